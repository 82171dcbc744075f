use utoipa::OpenApi;

use super::api::epochs::{ListQuery, NowResponse, SpeedResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::epochs::list_epochs,
        super::api::epochs::epoch_detail,
        super::api::epochs::epoch_speed,
        super::api::epochs::epoch_location,
        super::api::epochs::list_range,
        super::api::epochs::now,
        super::api::epochs::debug_info,
    ),
    components(
        schemas(
            ListQuery,
            SpeedResponse,
            NowResponse,
            crate::ephemeris::StateVector,
            crate::ephemeris::VectorComponent,
            crate::location::GroundFix,
        )
    ),
    info(
        title = "Orbitrack Ephemeris API",
        description = "State vector queries over the station ephemeris",
        version = "0.1.0"
    ),
    tags(
        (name = "epochs", description = "Ephemeris record queries"),
        (name = "status", description = "Service status")
    )
)]
pub struct ApiDoc;
