use core::str::FromStr;

use std::fmt::{Display, Formatter};

use anyhow::{anyhow, Context, Result};

use serde::{de::Visitor, Deserialize, Deserializer, Serialize, Serializer};

use crate::secp256k1::PublicKey as _PublicKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(_PublicKey);

impl std::hash::Hash for PublicKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.inner().serialize().hash(state);
    }
}

impl From<_PublicKey> for PublicKey {
    fn from(public_key: _PublicKey) -> Self {
        Self(public_key)
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PublicKeyVisitor;

        impl Visitor<'_> for PublicKeyVisitor {
            type Value = PublicKey;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(formatter, "A compressed public-key that is hex-encoded")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                PublicKey::from_hex(v).map_err(|err| E::custom(format!("{:#}", err)))
            }
        }

        deserializer.deserialize_str(PublicKeyVisitor)
    }
}

impl FromStr for PublicKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl PublicKey {
    pub fn from_hex(hex: &str) -> Result<Self> {
        let data = hex::decode(hex).context("Invalid hex")?;
        let publickey =
            _PublicKey::from_slice(&data).map_err(|m| anyhow!("Error parsing PublicKey: {}", m))?;
        Ok(PublicKey(publickey))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0.serialize())
    }

    pub fn inner(self) -> _PublicKey {
        self.0
    }
}

// Amounts are serialized as integers.
//
// The remote node isn't that consistent. Depending on the version it
// reports amounts as plain integers or as strings such as "1234msat".
// Both are accepted when parsing.
#[derive(Debug, Clone, PartialEq, PartialOrd, Eq, Ord, Copy, Default, Hash)]
pub struct SatAmount(u64);
#[derive(Debug, Clone, PartialEq, PartialOrd, Eq, Ord, Copy, Default, Hash)]
pub struct MsatAmount(u64);

impl std::fmt::Display for SatAmount {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(fmt, "{} sat", self.0)
    }
}

impl std::fmt::Display for MsatAmount {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(fmt, "{} msat", self.0)
    }
}

impl SatAmount {
    pub const ZERO: SatAmount = SatAmount(0);

    pub fn sat_value(&self) -> u64 {
        self.0
    }

    pub fn new(value: u64) -> Self {
        SatAmount(value)
    }

    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        let sat_value = self.0.checked_add(other.0)?;
        Some(SatAmount::new(sat_value))
    }

    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        let sat_value = self.0.checked_sub(other.0)?;
        Some(SatAmount::new(sat_value))
    }

    pub fn to_msat(&self) -> Option<MsatAmount> {
        let msat_value = self.0.checked_mul(1000)?;
        Some(MsatAmount::new(msat_value))
    }

    /// Sums the amounts or returns `None` on overflow
    pub fn checked_sum<I>(amounts: I) -> Option<Self>
    where
        I: IntoIterator<Item = SatAmount>,
    {
        amounts
            .into_iter()
            .try_fold(SatAmount::ZERO, |acc, x| acc.checked_add(&x))
    }
}

impl MsatAmount {
    pub const ZERO: MsatAmount = MsatAmount(0);

    pub fn msat_value(&self) -> u64 {
        self.0
    }

    pub fn new(value: u64) -> Self {
        MsatAmount(value)
    }

    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        let msat_value = self.0.checked_add(other.0)?;
        Some(MsatAmount::new(msat_value))
    }

    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        let msat_value = self.0.checked_sub(other.0)?;
        Some(MsatAmount::new(msat_value))
    }

    /// Converts to satoshi. Sub-satoshi amounts are truncated.
    pub fn to_sat(&self) -> SatAmount {
        SatAmount::new(self.0 / 1000)
    }
}

impl Serialize for SatAmount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(self.0)
    }
}

impl Serialize for MsatAmount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(self.0)
    }
}

/// Serializes the amount as a string of digits.
///
/// Use with `#[serde(serialize_with = "...")]` for records the wallet
/// expects to carry stringified amounts.
pub fn sat_as_string<S>(amount: &SatAmount, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&amount.0.to_string())
}

/// A count that is serialized as a string of digits and parsed from
/// either a string or an integer
pub mod digits {
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(super::AmountVisitor { suffix: "" })
    }
}

struct AmountVisitor {
    suffix: &'static str,
}

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = u64;

    fn expecting(&self, fmt: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(
            fmt,
            "An integer or a string of digits optionally suffixed with '{}'",
            self.suffix
        )
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        u64::try_from(v).map_err(|_| E::custom(format!("Amount cannot be negative: {}", v)))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        let digits = v.strip_suffix(self.suffix).unwrap_or(v);
        digits
            .parse::<u64>()
            .map_err(|_| E::custom(format!("Invalid amount '{}'", v)))
    }
}

impl<'de> Deserialize<'de> for SatAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = deserializer.deserialize_any(AmountVisitor { suffix: "sat" })?;
        Ok(Self(value))
    }
}

impl<'de> Deserialize<'de> for MsatAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = deserializer.deserialize_any(AmountVisitor { suffix: "msat" })?;
        Ok(Self(value))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShortChannelId(u64);

impl Serialize for ShortChannelId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ShortChannelId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        let s: String = Deserialize::deserialize(deserializer)?;
        Self::from_str(&s).map_err(|e| Error::custom(e.to_string()))
    }
}

impl FromStr for ShortChannelId {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Result<Vec<u64>, _> = s.split('x').map(|p| p.parse()).collect();
        let parts = parts.with_context(|| format!("Malformed short_channel_id: {}", s))?;
        if parts.len() != 3 {
            return Err(anyhow!(
                "Malformed short_channel_id: element count mismatch"
            ));
        }

        Ok(ShortChannelId(
            (parts[0] << 40) | (parts[1] << 16) | parts[2],
        ))
    }
}

impl Display for ShortChannelId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.block(), self.txindex(), self.outnum())
    }
}

impl ShortChannelId {
    pub fn block(&self) -> u32 {
        (self.0 >> 40) as u32 & 0xFFFFFF
    }
    pub fn txindex(&self) -> u32 {
        (self.0 >> 16) as u32 & 0xFFFFFF
    }
    pub fn outnum(&self) -> u16 {
        self.0 as u16
    }
}

/// On-chain fee rate as entered by the user, in satoshi per (virtual) byte.
///
/// Users may enter fractional rates such as `1.5`. The remote node expects
/// an integer rate per kilobyte, e.g. `"1500perkb"`. Digits beyond the
/// third decimal are truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeeRate {
    sat_per_kb: u64,
}

impl FeeRate {
    pub fn from_sat_per_vbyte(sat_per_vbyte: u32) -> Self {
        Self {
            sat_per_kb: u64::from(sat_per_vbyte) * 1000,
        }
    }

    pub fn from_sat_per_kb(sat_per_kb: u64) -> Self {
        Self { sat_per_kb }
    }

    pub fn sat_per_kb(&self) -> u64 {
        self.sat_per_kb
    }

    pub fn to_perkb_string(&self) -> String {
        format!("{}perkb", self.sat_per_kb)
    }
}

impl FromStr for FeeRate {
    type Err = anyhow::Error;

    /// Parses a decimal rate in sat/vB such as `"2"` or `"1.5"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
        let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(anyhow!("Invalid fee rate '{}'", s));
        }

        let whole: u64 = whole
            .parse()
            .with_context(|| format!("Invalid fee rate '{}'", s))?;
        let milli: u64 = format!("{:0<3}", &fraction[..fraction.len().min(3)])
            .parse()
            .with_context(|| format!("Invalid fee rate '{}'", s))?;

        let sat_per_kb = whole
            .checked_mul(1000)
            .and_then(|kb| kb.checked_add(milli))
            .ok_or_else(|| anyhow!("Fee rate too large '{}'", s))?;
        Ok(Self { sat_per_kb })
    }
}

impl Display for FeeRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let whole = self.sat_per_kb / 1000;
        let milli = self.sat_per_kb % 1000;
        if milli == 0 {
            write!(f, "{}", whole)
        } else {
            let fraction = format!("{:03}", milli);
            write!(f, "{}.{}", whole, fraction.trim_end_matches('0'))
        }
    }
}

impl Serialize for FeeRate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.sat_per_kb % 1000 == 0 {
            serializer.serialize_u64(self.sat_per_kb / 1000)
        } else {
            serializer.serialize_f64(self.sat_per_kb as f64 / 1000.0)
        }
    }
}

impl<'de> Deserialize<'de> for FeeRate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FeeRateVisitor;

        impl Visitor<'_> for FeeRateVisitor {
            type Value = FeeRate;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(formatter, "A non-negative fee rate in sat/vB")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                v.checked_mul(1000)
                    .map(FeeRate::from_sat_per_kb)
                    .ok_or_else(|| E::custom(format!("Fee rate too large: {}", v)))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                let v = u64::try_from(v)
                    .map_err(|_| E::custom(format!("Fee rate cannot be negative: {}", v)))?;
                self.visit_u64(v)
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                // The shortest representation keeps 1.005 from becoming 1.00499..
                self.visit_str(&v.to_string())
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                FeeRate::from_str(v).map_err(|err| E::custom(format!("{:#}", err)))
            }
        }

        deserializer.deserialize_any(FeeRateVisitor)
    }
}
