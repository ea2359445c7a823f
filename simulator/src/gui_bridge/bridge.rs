use crate::gui_bridge::model::VisualizationModel;
use ghkcore::{EstimatorError, FilterConfig, SessionController, SystemClock};
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex, MutexGuard},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

pub type SharedSession = Arc<Mutex<SessionController<SystemClock>>>;

pub fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

/// Pointer position posted by the rendering client.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
}

fn lock(session: &SharedSession) -> MutexGuard<'_, SessionController<SystemClock>> {
    session
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn reply_result<T: Serialize>(
    result: Result<T, EstimatorError>,
) -> warp::reply::WithStatus<warp::reply::Json> {
    match result {
        Ok(body) => warp::reply::with_status(warp::reply::json(&body), StatusCode::OK),
        Err(err) => warp::reply::with_status(
            warp::reply::json(&json!({ "error": err.to_string() })),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
    }
}

/// HTTP routes over a shared session. Every handler holds the session lock
/// for the whole request, so cycles never overlap and reads see a consistent
/// snapshot.
pub fn routes(
    session: SharedSession,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let session_filter = warp::any().map(move || session.clone());

    let trails_route = warp::path("trails")
        .and(warp::path::end())
        .and(warp::get())
        .and(session_filter.clone())
        .map(|session: SharedSession| {
            warp::reply::json(&VisualizationModel::from_session(&lock(&session)))
        });

    let sample_route = warp::path("sample")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(session_filter.clone())
        .map(|sample: PointerSample, session: SharedSession| {
            let result = lock(&session)
                .capture(sample.x, sample.y)
                .map(|report| report.estimate);
            reply_result(result)
        });

    let get_config_route = warp::path("config")
        .and(warp::path::end())
        .and(warp::get())
        .and(session_filter.clone())
        .map(|session: SharedSession| warp::reply::json(lock(&session).config()));

    let post_config_route = warp::path("config")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(session_filter.clone())
        .map(|config: FilterConfig, session: SharedSession| {
            let mut guard = lock(&session);
            let result = guard
                .apply_config(config)
                .map(|_| guard.config().clone());
            reply_result(result)
        });

    let reset_route = warp::path("reset")
        .and(warp::path::end())
        .and(warp::post())
        .and(session_filter)
        .map(|session: SharedSession| {
            lock(&session).reset();
            warp::reply::json(&json!({ "status": "ok" }))
        });

    trails_route
        .or(sample_route)
        .or(get_config_route)
        .or(post_config_route)
        .or(reset_route)
}

/// Bridge that hosts the tracking HTTP endpoint on a background thread.
pub struct GuiBridge {
    session: SharedSession,
}

impl GuiBridge {
    pub fn new(session: SharedSession, address: SocketAddr) -> Self {
        let routes = routes(session.clone());

        thread::spawn(move || {
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!("failed to build bridge runtime: {}", err);
                    return;
                }
            };
            runtime.block_on(async move {
                warp::serve(routes).run(address).await;
            });
        });

        Self { session }
    }

    pub fn publish_status(&self, message: &str) {
        info!("[GUI] {}", message);
    }

    pub fn snapshot(&self) -> VisualizationModel {
        VisualizationModel::from_session(&lock(&self.session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghkcore::Method;

    fn shared() -> SharedSession {
        let config = FilterConfig {
            seed: Some(4),
            ..Default::default()
        };
        Arc::new(Mutex::new(
            SessionController::new(config, SystemClock::new()).unwrap(),
        ))
    }

    #[tokio::test]
    async fn posted_samples_show_up_in_trails() {
        let session = shared();
        let api = routes(session.clone());

        std::thread::sleep(std::time::Duration::from_millis(2));
        let response = warp::test::request()
            .method("POST")
            .path("/sample")
            .json(&PointerSample { x: 12.0, y: 34.0 })
            .reply(&api)
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = warp::test::request()
            .method("GET")
            .path("/trails")
            .reply(&api)
            .await;
        let model: VisualizationModel = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(model.processed, 1);
        assert_eq!(model.trails[0].points[0].x, 12.0);
        assert_eq!(model.trails[2].points.len(), 1);
    }

    #[tokio::test]
    async fn kalman_config_is_rejected_with_unprocessable_entity() {
        let session = shared();
        let api = routes(session.clone());
        let config = FilterConfig {
            method: Method::Kalman,
            ..Default::default()
        };

        let response = warp::test::request()
            .method("POST")
            .path("/config")
            .json(&config)
            .reply(&api)
            .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert!(body["error"].as_str().unwrap().contains("kalman"));
        assert_eq!(lock(&session).config().method, Method::Ghk);
    }

    #[tokio::test]
    async fn config_update_is_echoed_back() {
        let session = shared();
        let api = routes(session.clone());
        let config = FilterConfig {
            seed: Some(4),
            ..FilterConfig::with_gains(0.7, 0.3, 0.2)
        };

        let response = warp::test::request()
            .method("POST")
            .path("/config")
            .json(&config)
            .reply(&api)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let echoed: FilterConfig = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(echoed, config);
    }
}
