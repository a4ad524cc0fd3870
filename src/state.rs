//! Shared application state injected into all handlers.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::application::services::{
    AuthService, MemberService, MetaService, PaymentService, PlanService, TrainerService,
    UserService,
};
use crate::application::session::MemoryTokenStore;
use crate::infrastructure::backend::{
    HttpAuthGateway, HttpMemberGateway, HttpMetaGateway, HttpPaymentGateway, HttpPlanGateway,
    HttpTrainerGateway, HttpUserGateway,
};

/// Handler-facing state: one `Arc`'d service per resource plus the bits the
/// health endpoint inspects.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<HttpAuthGateway, MemoryTokenStore>>,
    pub member_service: Arc<MemberService<HttpMemberGateway>>,
    pub trainer_service: Arc<TrainerService<HttpTrainerGateway>>,
    pub plan_service: Arc<PlanService<HttpPlanGateway>>,
    pub payment_service: Arc<PaymentService<HttpPaymentGateway>>,
    pub user_service: Arc<UserService<HttpUserGateway>>,
    pub meta_service: Arc<MetaService<HttpMetaGateway>>,
    pub store: Arc<MemoryTokenStore>,
    /// Last tick of the background refresh sweep.
    pub refresh_ticks: watch::Receiver<DateTime<Utc>>,
    pub refresh_interval: Duration,
    /// Whether session cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
}
