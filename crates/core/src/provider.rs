//! Provider base: the capability contract every analytics provider
//! implements, one method per canonical event kind.
//!
//! Dispatch code holds an `Arc<dyn AnalyticsProvider>` and routes any
//! [`CanonicalEvent`] through [`AnalyticsProvider::dispatch`].

use anyhow::Result;

use crate::config::CommonConfiguration;
use crate::events::*;

/// Analytics provider trait. Methods are fire-and-forget: `Ok(())` on success,
/// an error only when the underlying SDK fails.
pub trait AnalyticsProvider: Send + Sync {
    /// Provider identifier (e.g. "adobe").
    fn name(&self) -> &str;

    /// App/device configuration the provider was built with.
    fn common(&self) -> &CommonConfiguration;

    fn click_generic(&self, properties: &ClickGeneric) -> Result<()>;
    fn contact_call(&self, properties: &ContactCall) -> Result<()>;
    fn contact_email(&self, properties: &ContactEmail) -> Result<()>;
    fn impression_generic(&self, properties: &ImpressionGeneric) -> Result<()>;
    fn location_directions(&self, properties: &LocationDirections) -> Result<()>;
    fn pageview(&self, properties: &Screenview) -> Result<()>;
    fn screenview(&self, properties: &Screenview) -> Result<()>;
    fn search_generic(&self, properties: &SearchGeneric) -> Result<()>;

    fn add_product(&self, properties: &Product) -> Result<()>;
    fn checkout(&self, properties: &Checkout, action: &CheckoutAction) -> Result<()>;
    fn checkout_option(&self, properties: &Generics, action: &CheckoutAction) -> Result<()>;
    fn click_product(&self, properties: &Product, action: Option<&ProductAction>) -> Result<()>;
    fn click_promotion(&self, properties: &Promotion) -> Result<()>;
    fn impression_product(&self, properties: &ImpressionProduct) -> Result<()>;
    fn impression_promotion(&self, properties: &Promotion) -> Result<()>;
    fn detail_product(&self, properties: &Product, action: Option<&ProductAction>) -> Result<()>;
    fn purchase(&self, properties: &Transaction, action: &TransactionAction) -> Result<()>;
    fn refund_all(&self, properties: &Generics, action: &TransactionAction) -> Result<()>;
    fn refund_partial(&self, properties: &TransactionRefund, action: &TransactionAction)
        -> Result<()>;
    fn remove_product(&self, properties: &Product) -> Result<()>;

    fn lifecycle(&self, properties: &App) -> Result<()>;

    /// Route a canonical event to the matching per-kind method.
    fn dispatch(&self, event: &CanonicalEvent) -> Result<()> {
        match event {
            CanonicalEvent::ClickGeneric(p) => self.click_generic(p),
            CanonicalEvent::ContactCall(p) => self.contact_call(p),
            CanonicalEvent::ContactEmail(p) => self.contact_email(p),
            CanonicalEvent::ImpressionGeneric(p) => self.impression_generic(p),
            CanonicalEvent::LocationDirections(p) => self.location_directions(p),
            CanonicalEvent::Pageview(p) => self.pageview(p),
            CanonicalEvent::Screenview(p) => self.screenview(p),
            CanonicalEvent::SearchGeneric(p) => self.search_generic(p),
            CanonicalEvent::AddProduct(p) => self.add_product(p),
            CanonicalEvent::Checkout { properties, action } => self.checkout(properties, action),
            CanonicalEvent::CheckoutOption { properties, action } => {
                self.checkout_option(properties, action)
            }
            CanonicalEvent::ClickProduct { properties, action } => {
                self.click_product(properties, action.as_ref())
            }
            CanonicalEvent::ClickPromotion(p) => self.click_promotion(p),
            CanonicalEvent::ImpressionProduct(p) => self.impression_product(p),
            CanonicalEvent::ImpressionPromotion(p) => self.impression_promotion(p),
            CanonicalEvent::DetailProduct { properties, action } => {
                self.detail_product(properties, action.as_ref())
            }
            CanonicalEvent::Purchase { properties, action } => self.purchase(properties, action),
            CanonicalEvent::RefundAll { properties, action } => self.refund_all(properties, action),
            CanonicalEvent::RefundPartial { properties, action } => {
                self.refund_partial(properties, action)
            }
            CanonicalEvent::RemoveProduct(p) => self.remove_product(p),
            CanonicalEvent::Lifecycle(p) => self.lifecycle(p),
        }
    }

    /// Dispatch events one at a time, in order, stopping at the first failure.
    fn dispatch_all(&self, events: &[CanonicalEvent]) -> Result<()> {
        events.iter().try_for_each(|event| self.dispatch(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records the name of each method invoked.
    struct KindRecorder {
        common: CommonConfiguration,
        seen: Mutex<Vec<EventKind>>,
    }

    impl KindRecorder {
        fn new() -> Self {
            Self {
                common: CommonConfiguration::default(),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn hit(&self, kind: EventKind) -> Result<()> {
            self.seen.lock().expect("recorder mutex poisoned").push(kind);
            Ok(())
        }

        fn seen(&self) -> Vec<EventKind> {
            self.seen.lock().expect("recorder mutex poisoned").clone()
        }
    }

    impl AnalyticsProvider for KindRecorder {
        fn name(&self) -> &str {
            "recorder"
        }
        fn common(&self) -> &CommonConfiguration {
            &self.common
        }
        fn click_generic(&self, _: &ClickGeneric) -> Result<()> {
            self.hit(EventKind::ClickGeneric)
        }
        fn contact_call(&self, _: &ContactCall) -> Result<()> {
            self.hit(EventKind::ContactCall)
        }
        fn contact_email(&self, _: &ContactEmail) -> Result<()> {
            self.hit(EventKind::ContactEmail)
        }
        fn impression_generic(&self, _: &ImpressionGeneric) -> Result<()> {
            self.hit(EventKind::ImpressionGeneric)
        }
        fn location_directions(&self, _: &LocationDirections) -> Result<()> {
            self.hit(EventKind::LocationDirections)
        }
        fn pageview(&self, _: &Screenview) -> Result<()> {
            self.hit(EventKind::Pageview)
        }
        fn screenview(&self, _: &Screenview) -> Result<()> {
            self.hit(EventKind::Screenview)
        }
        fn search_generic(&self, _: &SearchGeneric) -> Result<()> {
            self.hit(EventKind::SearchGeneric)
        }
        fn add_product(&self, _: &Product) -> Result<()> {
            self.hit(EventKind::AddProduct)
        }
        fn checkout(&self, _: &Checkout, _: &CheckoutAction) -> Result<()> {
            self.hit(EventKind::Checkout)
        }
        fn checkout_option(&self, _: &Generics, _: &CheckoutAction) -> Result<()> {
            self.hit(EventKind::CheckoutOption)
        }
        fn click_product(&self, _: &Product, _: Option<&ProductAction>) -> Result<()> {
            self.hit(EventKind::ClickProduct)
        }
        fn click_promotion(&self, _: &Promotion) -> Result<()> {
            self.hit(EventKind::ClickPromotion)
        }
        fn impression_product(&self, _: &ImpressionProduct) -> Result<()> {
            self.hit(EventKind::ImpressionProduct)
        }
        fn impression_promotion(&self, _: &Promotion) -> Result<()> {
            self.hit(EventKind::ImpressionPromotion)
        }
        fn detail_product(&self, _: &Product, _: Option<&ProductAction>) -> Result<()> {
            self.hit(EventKind::DetailProduct)
        }
        fn purchase(&self, _: &Transaction, _: &TransactionAction) -> Result<()> {
            self.hit(EventKind::Purchase)
        }
        fn refund_all(&self, _: &Generics, _: &TransactionAction) -> Result<()> {
            self.hit(EventKind::RefundAll)
        }
        fn refund_partial(&self, _: &TransactionRefund, _: &TransactionAction) -> Result<()> {
            self.hit(EventKind::RefundPartial)
        }
        fn remove_product(&self, _: &Product) -> Result<()> {
            self.hit(EventKind::RemoveProduct)
        }
        fn lifecycle(&self, _: &App) -> Result<()> {
            self.hit(EventKind::Lifecycle)
        }
    }

    fn sample(kind: EventKind) -> CanonicalEvent {
        match kind {
            EventKind::ClickGeneric => CanonicalEvent::ClickGeneric(Default::default()),
            EventKind::ContactCall => CanonicalEvent::ContactCall(Default::default()),
            EventKind::ContactEmail => CanonicalEvent::ContactEmail(Default::default()),
            EventKind::ImpressionGeneric => CanonicalEvent::ImpressionGeneric(Default::default()),
            EventKind::LocationDirections => CanonicalEvent::LocationDirections(Default::default()),
            EventKind::Pageview => CanonicalEvent::Pageview(Default::default()),
            EventKind::Screenview => CanonicalEvent::Screenview(Default::default()),
            EventKind::SearchGeneric => CanonicalEvent::SearchGeneric(Default::default()),
            EventKind::AddProduct => CanonicalEvent::AddProduct(Default::default()),
            EventKind::Checkout => CanonicalEvent::Checkout {
                properties: Default::default(),
                action: Default::default(),
            },
            EventKind::CheckoutOption => CanonicalEvent::CheckoutOption {
                properties: Default::default(),
                action: Default::default(),
            },
            EventKind::ClickProduct => CanonicalEvent::ClickProduct {
                properties: Default::default(),
                action: None,
            },
            EventKind::ClickPromotion => CanonicalEvent::ClickPromotion(Default::default()),
            EventKind::ImpressionProduct => CanonicalEvent::ImpressionProduct(Default::default()),
            EventKind::ImpressionPromotion => {
                CanonicalEvent::ImpressionPromotion(Default::default())
            }
            EventKind::DetailProduct => CanonicalEvent::DetailProduct {
                properties: Default::default(),
                action: Some(Default::default()),
            },
            EventKind::Purchase => CanonicalEvent::Purchase {
                properties: Default::default(),
                action: Default::default(),
            },
            EventKind::RefundAll => CanonicalEvent::RefundAll {
                properties: Default::default(),
                action: Default::default(),
            },
            EventKind::RefundPartial => CanonicalEvent::RefundPartial {
                properties: Default::default(),
                action: Default::default(),
            },
            EventKind::RemoveProduct => CanonicalEvent::RemoveProduct(Default::default()),
            EventKind::Lifecycle => CanonicalEvent::Lifecycle(Default::default()),
        }
    }

    #[test]
    fn test_dispatch_routes_every_kind() {
        let provider = KindRecorder::new();
        for kind in EventKind::ALL {
            let event = sample(kind);
            assert_eq!(event.kind(), kind);
            provider.dispatch(&event).unwrap();
        }
        assert_eq!(provider.seen(), EventKind::ALL.to_vec());
    }

    #[test]
    fn test_dispatch_all_preserves_order() {
        let provider = KindRecorder::new();
        let events = vec![
            sample(EventKind::Purchase),
            sample(EventKind::Pageview),
            sample(EventKind::Purchase),
        ];
        provider.dispatch_all(&events).unwrap();
        assert_eq!(
            provider.seen(),
            vec![EventKind::Purchase, EventKind::Pageview, EventKind::Purchase]
        );
    }

    #[test]
    fn test_trait_object_usable() {
        let provider: std::sync::Arc<dyn AnalyticsProvider> =
            std::sync::Arc::new(KindRecorder::new());
        assert_eq!(provider.name(), "recorder");
        provider.dispatch(&sample(EventKind::Lifecycle)).unwrap();
    }
}
