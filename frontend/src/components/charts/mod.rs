pub mod definitions;
pub mod geometry;
pub mod live;
pub mod renderer;

pub use live::start_invoice_status;
pub use renderer::ChartHandle;

use shared::{ChartEndpoint, Series};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlCanvasElement};

use crate::services::{dom, ApiClient, DashboardError, Logger};
use definitions::ChartDefinition;

/// Fetch and draw every one-shot chart whose canvas is on this page.
/// Each chart loads on its own; one failing leaves the others alone.
pub fn render_charts(document: &Document, api: &ApiClient) {
    for definition in definitions::one_shot_charts() {
        match canvas_for(document, &definition) {
            Ok(canvas) => spawn_local(render_once(api.clone(), definition, canvas)),
            Err(e) => Logger::debug_with_component(definition.component, &e.to_string()),
        }
    }
}

pub(crate) fn canvas_for(document: &Document, definition: &ChartDefinition) -> Result<HtmlCanvasElement, DashboardError> {
    dom::require_element(document, definition.canvas_id)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| DashboardError::Render(format!("#{} is not a canvas", definition.canvas_id)))
}

pub(crate) async fn fetch_series(api: &ApiClient, endpoint: ChartEndpoint) -> Result<Series, DashboardError> {
    let response = api.get_chart(endpoint).await?;
    Ok(Series::try_from(response)?)
}

async fn load_chart(api: &ApiClient, definition: &ChartDefinition, canvas: HtmlCanvasElement) -> Result<ChartHandle, DashboardError> {
    let series = fetch_series(api, definition.endpoint).await?;
    ChartHandle::create(canvas, definition.kind.clone(), series)
}

async fn render_once(api: ApiClient, definition: ChartDefinition, canvas: HtmlCanvasElement) {
    match load_chart(&api, &definition, canvas).await {
        Ok(chart) => Logger::debug_with_component(
            definition.component,
            &format!("Rendered {} categories from {}", chart.category_count(), definition.endpoint),
        ),
        Err(e) => Logger::error_with_component(
            definition.component,
            &format!("Error loading chart: {}", e),
        ),
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_unreachable_backend_is_a_network_error() {
        let document = dom::document().unwrap();
        let canvas: HtmlCanvasElement = document.create_element("canvas").unwrap().unchecked_into();
        let api = ApiClient::with_base_url("http://127.0.0.1:9".to_string());

        for definition in definitions::one_shot_charts() {
            let err = load_chart(&api, &definition, canvas.clone()).await.err().unwrap();
            assert!(matches!(err, DashboardError::Network(_)), "{}: {}", definition.component, err);
        }
    }

    #[wasm_bindgen_test]
    async fn test_failed_render_completes_quietly() {
        let document = dom::document().unwrap();
        let canvas: HtmlCanvasElement = document.create_element("canvas").unwrap().unchecked_into();
        let api = ApiClient::with_base_url("http://127.0.0.1:9".to_string());
        render_once(api, definitions::fees_status(), canvas).await;
    }
}
