use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::config::MapSettings;
use crate::core::{extract_place_label, LocationResolver};
use crate::maps::{MapBoard, PlaceholderOutcome, WidgetSpecRenderer};
use crate::models::{
    ErrorResponse, HealthResponse, MapBoardRequest, MapBoardResponse, MapPlaceholder, PlaceholderKind,
    ResolveLocationRequest, ResolveLocationResponse, ValidateOptionRequest, ValidateOptionResponse,
};
use crate::ui::validate_new_option;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub resolver: LocationResolver,
    pub map_settings: MapSettings,
}

impl AppState {
    fn board(&self) -> MapBoard<WidgetSpecRenderer> {
        MapBoard::new(
            WidgetSpecRenderer::new(),
            self.resolver.clone(),
            self.map_settings.clone(),
        )
    }
}

/// Configure all location and option routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/locations/resolve", web::post().to(resolve_location))
        .route("/locations/board", web::post().to(map_board))
        .route("/options/validate", web::post().to(validate_option));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn validation_failed(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message,
        status_code: 400,
    })
}

/// Resolve a single location URL
///
/// POST /api/v1/locations/resolve
///
/// Request body:
/// ```json
/// {
///   "url": "https://www.google.com/maps/place/Bristol+Pub/@22.15,-101.01,17z",
///   "elementId": "map2"
/// }
/// ```
async fn resolve_location(
    state: web::Data<AppState>,
    req: web::Json<ResolveLocationRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for resolve request: {:?}", errors);
        return validation_failed(errors.to_string());
    }

    let (resolution, rule) = state.resolver.resolve_with_rule(&req.url);
    let label = extract_place_label(&req.url);

    let placeholder = MapPlaceholder {
        element_id: req.element_id.clone().unwrap_or_else(|| "map0".to_string()),
        kind: PlaceholderKind::OptionMap,
        location: Some(req.url.clone()),
    };

    let mut board = state.board();
    let outcome = board.init_maps(std::slice::from_ref(&placeholder)).pop();
    let mut widgets = board.into_renderer().into_widgets();

    let (widget, panel) = match outcome {
        Some(PlaceholderOutcome::Map { .. }) => (widgets.pop(), None),
        Some(PlaceholderOutcome::Fallback { panel, .. }) => (None, Some(panel)),
        Some(PlaceholderOutcome::Untouched { .. }) | None => (None, None),
    };

    tracing::debug!("Resolved {} as {:?} (rule {:?})", req.url, resolution, rule);

    HttpResponse::Ok().json(ResolveLocationResponse {
        resolution,
        rule,
        label,
        widget,
        panel,
    })
}

/// Lay out every map placeholder of a page
///
/// POST /api/v1/locations/board
async fn map_board(
    state: web::Data<AppState>,
    req: web::Json<MapBoardRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors.to_string());
    }

    let mut board = state.board();
    let outcomes = board.init_maps(&req.placeholders);
    let widgets = board.into_renderer().into_widgets();

    tracing::info!(
        "Laid out {} placeholders ({} live maps)",
        outcomes.len(),
        widgets.len()
    );

    HttpResponse::Ok().json(MapBoardResponse { outcomes, widgets })
}

/// Check "add option" text before the form posts
///
/// POST /api/v1/options/validate
async fn validate_option(req: web::Json<ValidateOptionRequest>) -> impl Responder {
    match validate_new_option(&req.text) {
        Ok(text) => HttpResponse::Ok().json(ValidateOptionResponse { text }),
        Err(rejection) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid option".to_string(),
            message: rejection.to_string(),
            status_code: 400,
        }),
    }
}
