use anyhow::{Context, Result};

use spark_primitives::common_schemas::MsatAmount;
use spark_primitives::remote::GetRouteResponse;
use spark_primitives::wallet::{Route, RoutesResponse};

/// The fee is what the first hop receives on top of the requested amount
pub fn routes(response: &GetRouteResponse, requested: MsatAmount) -> Result<RoutesResponse> {
    let first_hop = response
        .route
        .first()
        .context("The remote node returned an empty route")?;

    let total_fees = first_hop.msatoshi.checked_sub(&requested).with_context(|| {
        format!(
            "The route delivers {} which is less than the requested {}",
            first_hop.msatoshi, requested
        )
    })?;

    Ok(RoutesResponse {
        routes: vec![Route {
            total_fees: total_fees.to_sat(),
        }],
    })
}
