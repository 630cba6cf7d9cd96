use js_sys::{Array, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, spawn_local, JsFuture};
use web_sys::{Cache, RegistrationOptions, Request, Response, ServiceWorkerGlobalScope, Window};

use super::error::DashboardError;
use super::logging::Logger;

const COMPONENT: &str = "service-worker";

pub const CACHE_NAME: &str = "attendance-cache-v1";

/// Fetched into the cache when the worker installs
pub const PRECACHED_ASSETS: [&str; 3] = ["/", "/static/css/app.css", "/static/js/dashboard-charts.js"];

fn worker_scope() -> Result<ServiceWorkerGlobalScope, DashboardError> {
    js_sys::global()
        .dyn_into::<ServiceWorkerGlobalScope>()
        .map_err(|_| DashboardError::Js("not running in a service worker".to_string()))
}

fn reject(err: DashboardError) -> JsValue {
    Logger::error_with_component(COMPONENT, &err.to_string());
    JsValue::from_str(&err.to_string())
}

/// Fill the cache with the shell assets. The worker bootstrap passes this
/// promise to `install`'s `waitUntil`.
#[wasm_bindgen]
pub fn precache_assets() -> Promise {
    future_to_promise(async {
        let scope = worker_scope().map_err(reject)?;
        precache(&scope).await.map_err(reject)?;
        Ok(JsValue::UNDEFINED)
    })
}

/// Cached response for `request`, else the network's. The worker bootstrap
/// passes this promise to `fetch`'s `respondWith`.
#[wasm_bindgen]
pub fn cache_first_response(request: Request) -> Promise {
    future_to_promise(async move {
        let scope = worker_scope().map_err(reject)?;
        let response = cache_first(&scope, request).await.map_err(reject)?;
        Ok(response.into())
    })
}

/// Whether this module was loaded by the worker bootstrap rather than a page
pub fn in_worker() -> bool {
    worker_scope().is_ok()
}

async fn precache(scope: &ServiceWorkerGlobalScope) -> Result<(), DashboardError> {
    let caches = scope.caches().map_err(DashboardError::js)?;
    let cache: Cache = JsFuture::from(caches.open(CACHE_NAME))
        .await
        .map_err(DashboardError::js)?
        .unchecked_into();

    let assets: Array = PRECACHED_ASSETS.iter().map(|asset| JsValue::from_str(asset)).collect();
    JsFuture::from(cache.add_all_with_str_sequence(&assets))
        .await
        .map_err(DashboardError::js)?;

    Logger::info_with_component(COMPONENT, &format!("Cached {} assets in {}", PRECACHED_ASSETS.len(), CACHE_NAME));
    Ok(())
}

async fn cache_first(scope: &ServiceWorkerGlobalScope, request: Request) -> Result<Response, DashboardError> {
    let caches = scope.caches().map_err(DashboardError::js)?;
    let cached = JsFuture::from(caches.match_with_request(&request))
        .await
        .map_err(DashboardError::js)?;
    if !cached.is_undefined() && !cached.is_null() {
        return Ok(cached.unchecked_into());
    }

    let response = JsFuture::from(scope.fetch_with_request(&request))
        .await
        .map_err(DashboardError::js)?;
    Ok(response.unchecked_into())
}

/// Register the worker bootstrap from a page, when the browser supports it.
pub fn register(window: &Window, script_url: &str) {
    let navigator = window.navigator();
    let supported = js_sys::Reflect::has(&navigator, &JsValue::from_str("serviceWorker")).unwrap_or(false);
    if !supported {
        Logger::debug_with_component(COMPONENT, "Service workers not supported here");
        return;
    }

    // The bootstrap imports the wasm-bindgen glue, so it must load as a module
    let options = RegistrationOptions::new();
    options.set_type("module");
    let registration = navigator
        .service_worker()
        .register_with_options(script_url, &options);
    let script_url = script_url.to_string();
    spawn_local(async move {
        match JsFuture::from(registration).await {
            Ok(_) => Logger::debug_with_component(COMPONENT, &format!("Registered {}", script_url)),
            Err(e) => Logger::warn_with_component(
                COMPONENT,
                &format!("Registration of {} failed: {}", script_url, DashboardError::js(e)),
            ),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precache_list_covers_shell_assets() {
        assert_eq!(CACHE_NAME, "attendance-cache-v1");
        assert!(PRECACHED_ASSETS.contains(&"/"));
        assert!(PRECACHED_ASSETS.contains(&"/static/css/app.css"));
        assert!(PRECACHED_ASSETS.contains(&"/static/js/dashboard-charts.js"));
    }

    #[test]
    fn test_bootstrap_attaches_handlers_before_wasm_loads() {
        let bootstrap = include_str!("../../static/sw.js");
        assert!(bootstrap.contains("self.addEventListener(\"install\""));
        assert!(bootstrap.contains("self.addEventListener(\"fetch\""));
        assert!(bootstrap.contains("precache_assets()"));
        assert!(bootstrap.contains("cache_first_response(event.request)"));
        // module workers can't await at the top level
        assert!(!bootstrap.lines().any(|line| line.starts_with("await ")));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_page_is_not_a_worker() {
        assert!(!in_worker());
    }

    #[wasm_bindgen_test]
    async fn test_worker_exports_reject_outside_a_worker() {
        let rejected = JsFuture::from(precache_assets()).await.unwrap_err();
        assert_eq!(rejected.as_string().unwrap(), "browser call failed: not running in a service worker");

        let request = Request::new_with_str("/").unwrap();
        assert!(JsFuture::from(cache_first_response(request)).await.is_err());
    }
}
