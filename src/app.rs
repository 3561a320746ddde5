//! HTTP routes

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::client::cache::{CacheContext, HtmlCache};
use crate::client::catalog::{DetailClient, ListClient, StageClient};
use crate::client::email::{EmailSummary, PaymentEmail};
use crate::client::i18n::I18n;
use crate::client::session::{Session, SessionStore, COOKIE_NAME};
use crate::client::{error_message, render_errors, ClientContext, ClientRequest};
use crate::config::Settings;
use crate::controller::{CatalogController, OrderController};
use crate::domain::repository::{DynOrderRepository, DynProductRepository};
use crate::error::{Error, Result, ShopError};

pub const DETAIL_UID: &str = "catalog-detail";

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub clients: ClientContext,
    pub sessions: SessionStore,
    pub detail: Arc<DetailClient>,
    pub stage: Arc<StageClient>,
    pub list: Arc<ListClient>,
}

impl AppState {
    pub fn new(settings: Settings, products: DynProductRepository, orders: DynOrderRepository) -> Result<Self> {
        let clients = ClientContext {
            config: Arc::new(settings.client.clone()),
            catalog: CatalogController::new(products),
            orders: OrderController::new(orders),
            cache: HtmlCache::new(settings.cache_capacity, settings.cache_ttl()),
            cache_context: CacheContext { site: settings.site.clone(), locale: settings.locale.clone(), currency: settings.currency.clone() },
            i18n: Arc::new(I18n::new(settings.locale.clone())),
        };
        Ok(Self {
            detail: Arc::new(DetailClient::new(clients.clone(), &settings.base_url)?),
            stage: Arc::new(StageClient::new(clients.clone())),
            list: Arc::new(ListClient::new(clients.clone())),
            sessions: SessionStore::new(settings.cache_capacity, Duration::from_secs(2 * 3600)),
            settings: Arc::new(settings),
            clients,
        })
    }

    async fn request(&self, headers: &HeaderMap, params: BTreeMap<String, String>) -> ClientRequest {
        let session = self.sessions.load(session_id(headers).as_deref()).await;
        ClientRequest::new(params, session)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "storefront-html"})) }))
        .route("/catalog/detail/:id", get(catalog_detail))
        .route("/catalog/stage", get(catalog_stage))
        .route("/catalog/list", get(catalog_list))
        .route("/orders/:id/email/payment", get(payment_email))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .map(|(_, value)| value.to_string())
}

fn html_response(session: &Session, status: StatusCode, body: String) -> Response {
    let mut response = (status, Html(body)).into_response();
    if session.is_new() {
        let cookie = format!("{COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Lax", session.id());
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }
    response
}

async fn catalog_detail(
    State(s): State<AppState>,
    Path(id): Path<String>,
    Query(mut params): Query<BTreeMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    params.insert("d_prodid".into(), id);
    let req = s.request(&headers, params).await;
    let stage = s.stage.body(&req).await;
    let page = s.detail.page(DETAIL_UID, &req, &stage).await;
    html_response(&req.session, StatusCode::OK, page)
}

async fn catalog_stage(State(s): State<AppState>, Query(params): Query<BTreeMap<String, String>>, headers: HeaderMap) -> Response {
    let req = s.request(&headers, params).await;
    let body = s.stage.body(&req).await;
    html_response(&req.session, StatusCode::OK, body)
}

async fn catalog_list(State(s): State<AppState>, Query(params): Query<BTreeMap<String, String>>, headers: HeaderMap) -> Response {
    let req = s.request(&headers, params).await;
    let body = s.list.body(&req).await;
    html_response(&req.session, StatusCode::OK, body)
}

async fn render_payment_email(s: &AppState, id: &str) -> Result<String> {
    let order = s.clients.orders.order(id).await?;
    let summary = EmailSummary::from_order(&order, s.settings.shop_name.clone(), String::new()).map_err(ShopError::from)?;
    Ok(PaymentEmail::new(&order, &summary, &s.clients.i18n).render())
}

async fn payment_email(State(s): State<AppState>, Path(id): Path<String>) -> Response {
    match render_payment_email(&s, &id).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            let status = match &e {
                Error::Controller(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Html(render_errors("email", &[error_message(&e, &s.clients.i18n)]))).into_response()
        }
    }
}
