//! Adobe Analytics provider: translates canonical events into Adobe
//! `trackState` / `trackAction` hits.
//!
//! A normalizer registered for an event kind takes over completely: its
//! `hitName` becomes the hit name, its `hitType` picks the SDK primitive and
//! every other field is sent as context data. Without one, the built-in
//! default for that kind applies (see the individual methods).

use std::sync::Arc;

use anyhow::Result;
use engage_core::config::{AdobeSettings, CommonConfiguration};
use engage_core::events::*;
use engage_core::{AnalyticsProvider, ContextData, Dictionary, EventNormalizers, HitType};
use serde_json::json;
use tracing::{debug, info, trace};

use crate::adapter::AdobeAnalyticsApi;
use crate::serialize::{generate_action_name, serialize_product, serialize_products, PRODUCTS_KEY};

/// Hit name used for purchases when no normalizer is registered.
pub const PURCHASE_HIT_NAME: &str = "purchase";

/// Construction-time configuration for [`AdobeAnalyticsProvider`].
#[derive(Debug, Default)]
pub struct AdapterConfig {
    /// Passed verbatim to the SDK's `init`.
    pub debug: Option<bool>,
    pub event_normalizers: EventNormalizers,
}

impl AdapterConfig {
    pub fn new(event_normalizers: EventNormalizers) -> Self {
        Self {
            debug: None,
            event_normalizers,
        }
    }

    /// Build from loaded settings plus code-supplied normalizers.
    pub fn from_settings(settings: &AdobeSettings, event_normalizers: EventNormalizers) -> Self {
        Self {
            debug: Some(settings.debug),
            event_normalizers,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }
}

/// Adobe Analytics provider.
pub struct AdobeAnalyticsProvider {
    common: CommonConfiguration,
    client: Arc<dyn AdobeAnalyticsApi>,
    normalizers: EventNormalizers,
    debug: bool,
}

impl AdobeAnalyticsProvider {
    /// Initialize the SDK once and take ownership of the normalizers.
    pub fn new(
        common: CommonConfiguration,
        client: Arc<dyn AdobeAnalyticsApi>,
        config: AdapterConfig,
    ) -> Result<Self> {
        client.init(config.debug)?;

        info!(
            app_name = %common.app_name,
            debug = ?config.debug,
            normalizers = ?config.event_normalizers.kinds(),
            "Adobe analytics provider initialized"
        );

        Ok(Self {
            common,
            client,
            normalizers: config.event_normalizers,
            debug: config.debug.unwrap_or(false),
        })
    }

    /// Direct SDK access for video and timed-action tracking.
    pub fn client(&self) -> &Arc<dyn AdobeAnalyticsApi> {
        &self.client
    }

    pub fn normalizers(&self) -> &EventNormalizers {
        &self.normalizers
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Run the normalizer registered for `kind` and send its hit. `None` when
    /// no normalizer is registered, so the caller falls back to its default.
    fn normalized<F>(&self, kind: EventKind, event: F) -> Option<Result<()>>
    where
        F: FnOnce() -> CanonicalEvent,
    {
        let normalizer = self.normalizers.get(kind)?;
        let data = normalizer(&event());
        trace!(%kind, hit_name = %data.hit_name, "event normalized");
        Some(self.send(data))
    }

    fn send(&self, data: ContextData) -> Result<()> {
        let (hit_name, hit_type, context_data) = data.into_parts();
        debug!(
            hit_name = %hit_name,
            hit_type = ?hit_type,
            fields = context_data.len(),
            "Adobe hit sent"
        );
        match hit_type {
            HitType::TrackAction => self.client.track_action(&hit_name, Some(&context_data)),
            HitType::TrackState => self.client.track_state(&hit_name, Some(&context_data)),
        }
    }

    fn skip(&self, kind: EventKind) -> Result<()> {
        trace!(%kind, "no default hit for event, skipped");
        Ok(())
    }

    fn generic_action(&self, generics: &Generics) -> Result<()> {
        let name = action_name(generics);
        debug!(hit_name = %name, "Adobe action sent");
        self.client.track_action(&name, None)
    }

    fn generic_state(&self, generics: &Generics) -> Result<()> {
        let name = action_name(generics);
        debug!(hit_name = %name, "Adobe state sent");
        self.client.track_state(&name, None)
    }

    fn view_state(&self, view: &Screenview) -> Result<()> {
        let name = generate_action_name(&view.generics.event_category, Some(""));
        debug!(hit_name = %name, "Adobe state sent");
        self.client.track_state(&name, None)
    }

    fn product_hit(&self, hit_type: HitType, generics: &Generics, products: String) -> Result<()> {
        let data = ContextData {
            hit_name: action_name(generics),
            hit_type,
            fields: products_payload(products),
        };
        self.send(data)
    }
}

fn action_name(generics: &Generics) -> String {
    generate_action_name(&generics.event_category, generics.event_action.as_deref())
}

fn products_payload(products: String) -> Dictionary {
    let mut payload = Dictionary::new();
    payload.insert(PRODUCTS_KEY.to_string(), json!(products));
    payload
}

impl AnalyticsProvider for AdobeAnalyticsProvider {
    fn name(&self) -> &str {
        "adobe"
    }

    fn common(&self) -> &CommonConfiguration {
        &self.common
    }

    // Click and contact events have no default hit; they need a normalizer.

    fn click_generic(&self, properties: &ClickGeneric) -> Result<()> {
        self.normalized(EventKind::ClickGeneric, || {
            CanonicalEvent::ClickGeneric(properties.clone())
        })
        .unwrap_or_else(|| self.skip(EventKind::ClickGeneric))
    }

    fn contact_call(&self, properties: &ContactCall) -> Result<()> {
        self.normalized(EventKind::ContactCall, || {
            CanonicalEvent::ContactCall(properties.clone())
        })
        .unwrap_or_else(|| self.skip(EventKind::ContactCall))
    }

    fn contact_email(&self, properties: &ContactEmail) -> Result<()> {
        self.normalized(EventKind::ContactEmail, || {
            CanonicalEvent::ContactEmail(properties.clone())
        })
        .unwrap_or_else(|| self.skip(EventKind::ContactEmail))
    }

    fn impression_generic(&self, properties: &ImpressionGeneric) -> Result<()> {
        self.normalized(EventKind::ImpressionGeneric, || {
            CanonicalEvent::ImpressionGeneric(properties.clone())
        })
        .unwrap_or_else(|| self.generic_state(&properties.generics))
    }

    fn location_directions(&self, properties: &LocationDirections) -> Result<()> {
        self.normalized(EventKind::LocationDirections, || {
            CanonicalEvent::LocationDirections(properties.clone())
        })
        .unwrap_or_else(|| self.generic_action(&properties.generics))
    }

    fn pageview(&self, properties: &Screenview) -> Result<()> {
        self.normalized(EventKind::Pageview, || {
            CanonicalEvent::Pageview(properties.clone())
        })
        .unwrap_or_else(|| self.view_state(properties))
    }

    fn screenview(&self, properties: &Screenview) -> Result<()> {
        self.normalized(EventKind::Screenview, || {
            CanonicalEvent::Screenview(properties.clone())
        })
        .unwrap_or_else(|| self.view_state(properties))
    }

    fn search_generic(&self, properties: &SearchGeneric) -> Result<()> {
        self.normalized(EventKind::SearchGeneric, || {
            CanonicalEvent::SearchGeneric(properties.clone())
        })
        .unwrap_or_else(|| self.generic_action(&properties.generics))
    }

    fn add_product(&self, properties: &Product) -> Result<()> {
        self.normalized(EventKind::AddProduct, || {
            CanonicalEvent::AddProduct(properties.clone())
        })
        .unwrap_or_else(|| {
            self.product_hit(
                HitType::TrackAction,
                &properties.generics,
                serialize_product(properties),
            )
        })
    }

    fn checkout(&self, properties: &Checkout, action: &CheckoutAction) -> Result<()> {
        self.normalized(EventKind::Checkout, || CanonicalEvent::Checkout {
            properties: properties.clone(),
            action: action.clone(),
        })
        .unwrap_or_else(|| {
            self.product_hit(
                HitType::TrackState,
                &properties.generics,
                serialize_products(&properties.products),
            )
        })
    }

    fn checkout_option(&self, properties: &Generics, action: &CheckoutAction) -> Result<()> {
        self.normalized(EventKind::CheckoutOption, || CanonicalEvent::CheckoutOption {
            properties: properties.clone(),
            action: action.clone(),
        })
        .unwrap_or_else(|| self.generic_state(properties))
    }

    fn click_product(&self, properties: &Product, action: Option<&ProductAction>) -> Result<()> {
        self.normalized(EventKind::ClickProduct, || CanonicalEvent::ClickProduct {
            properties: properties.clone(),
            action: action.cloned(),
        })
        .unwrap_or_else(|| {
            self.product_hit(
                HitType::TrackAction,
                &properties.generics,
                serialize_product(properties),
            )
        })
    }

    fn click_promotion(&self, properties: &Promotion) -> Result<()> {
        self.normalized(EventKind::ClickPromotion, || {
            CanonicalEvent::ClickPromotion(properties.clone())
        })
        .unwrap_or_else(|| self.generic_action(&properties.generics))
    }

    fn impression_product(&self, properties: &ImpressionProduct) -> Result<()> {
        self.normalized(EventKind::ImpressionProduct, || {
            CanonicalEvent::ImpressionProduct(properties.clone())
        })
        .unwrap_or_else(|| {
            self.product_hit(
                HitType::TrackState,
                &properties.generics,
                serialize_product(properties),
            )
        })
    }

    fn impression_promotion(&self, properties: &Promotion) -> Result<()> {
        self.normalized(EventKind::ImpressionPromotion, || {
            CanonicalEvent::ImpressionPromotion(properties.clone())
        })
        .unwrap_or_else(|| self.generic_state(&properties.generics))
    }

    fn detail_product(&self, properties: &Product, action: Option<&ProductAction>) -> Result<()> {
        self.normalized(EventKind::DetailProduct, || CanonicalEvent::DetailProduct {
            properties: properties.clone(),
            action: action.cloned(),
        })
        .unwrap_or_else(|| self.generic_state(&properties.generics))
    }

    fn purchase(&self, properties: &Transaction, action: &TransactionAction) -> Result<()> {
        self.normalized(EventKind::Purchase, || CanonicalEvent::Purchase {
            properties: properties.clone(),
            action: action.clone(),
        })
        .unwrap_or_else(|| {
            let data = ContextData::action(PURCHASE_HIT_NAME)
                .with_field(PRODUCTS_KEY, serialize_products(&properties.products))
                .with_field("purchaseId", action.identifier.clone())
                .with_field("purchase", 1);
            self.send(data)
        })
    }

    fn refund_all(&self, properties: &Generics, action: &TransactionAction) -> Result<()> {
        self.normalized(EventKind::RefundAll, || CanonicalEvent::RefundAll {
            properties: properties.clone(),
            action: action.clone(),
        })
        .unwrap_or_else(|| self.generic_action(properties))
    }

    fn refund_partial(
        &self,
        properties: &TransactionRefund,
        action: &TransactionAction,
    ) -> Result<()> {
        self.normalized(EventKind::RefundPartial, || CanonicalEvent::RefundPartial {
            properties: properties.clone(),
            action: action.clone(),
        })
        .unwrap_or_else(|| self.generic_action(&properties.generics))
    }

    fn remove_product(&self, properties: &Product) -> Result<()> {
        self.normalized(EventKind::RemoveProduct, || {
            CanonicalEvent::RemoveProduct(properties.clone())
        })
        .unwrap_or_else(|| self.generic_action(&properties.generics))
    }

    /// No-op: the Adobe SDK collects lifecycle metrics itself. A normalizer
    /// registered for `lifecycle` is never consulted.
    fn lifecycle(&self, _properties: &App) -> Result<()> {
        self.skip(EventKind::Lifecycle)
    }
}
