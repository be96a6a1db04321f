use crate::response::app_response::SuccessResponse;
use serde::Serialize;
use std::sync::OnceLock;
use std::time::Instant;

static START_TIME: OnceLock<Instant> = OnceLock::new();

pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

#[derive(Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub uptime_seconds: u64,
}

pub async fn health_check() -> SuccessResponse<HealthDto> {
    let uptime_seconds = START_TIME
        .get()
        .map(|start| start.elapsed().as_secs())
        .unwrap_or(0);

    SuccessResponse::send(HealthDto {
        status: "ok",
        uptime_seconds,
    })
}
