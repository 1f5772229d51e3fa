use crate::core::catalog::{Catalog, CatalogFilter, ComponentFilter};
use crate::core::payload::{build_order_payload, payload_for_offering, publish_payload};
use crate::core::pricing::{clamp_energy, compute_totals, format_inr, PricingPolicy, Quote};
use crate::domain::defaults::{default_service, demo_org, demo_transaction, initial_offerings};
use crate::domain::model::{
    now_iso, Offering, OfferingPatch, OrderPayload, ServiceSchema, SupplierOrg, TransactionDetails,
};
use crate::domain::ports::SubmissionReceipt;
use crate::utils::error::{Result, SellerError};
use crate::utils::validation::parse_quantity;

const FALLBACK_ENERGY_KWH: f64 = 10.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PublishState {
    #[default]
    Idle,
    Publishing,
}

/// Snapshot taken when a publish starts; handed back to finish it.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishTicket {
    pub offering_id: String,
    pub energy_kwh: f64,
    pub price_per_kwh: f64,
    pub quote: Quote,
    pub payload: OrderPayload,
}

/// Success notice shown after a publish.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishNotification {
    pub title: String,
    pub description: String,
    pub offering_id: String,
    pub energy_kwh: f64,
    pub price_per_kwh: f64,
    pub base_payout: f64,
    pub total: f64,
    pub receipt: SubmissionReceipt,
}

impl PublishNotification {
    fn new(ticket: PublishTicket, receipt: SubmissionReceipt) -> Self {
        let description = format!(
            "Energy: {} kWh • Price: {}/kWh • Payout est.: {}",
            ticket.energy_kwh,
            format_inr(ticket.price_per_kwh),
            format_inr(ticket.quote.base)
        );
        Self {
            title: "Offering published!".to_string(),
            description,
            offering_id: ticket.offering_id,
            energy_kwh: ticket.energy_kwh,
            price_per_kwh: ticket.price_per_kwh,
            base_payout: ticket.quote.base,
            total: ticket.quote.total,
            receipt,
        }
    }
}

/// Everything a seller edits in one sitting. Nothing here is persisted.
#[derive(Debug, Clone)]
pub struct SellerSession {
    catalog: Catalog,
    filter: CatalogFilter,
    selected_id: Option<String>,
    energy_kwh: f64,
    org: SupplierOrg,
    service: ServiceSchema,
    tx: TransactionDetails,
    pricing: PricingPolicy,
    publish_state: PublishState,
}

impl Default for SellerSession {
    fn default() -> Self {
        Self::new(PricingPolicy::default())
    }
}

impl SellerSession {
    /// Session seeded with the demo catalog and records.
    pub fn new(pricing: PricingPolicy) -> Self {
        Self::with_catalog(Catalog::new(initial_offerings()), pricing)
    }

    pub fn with_catalog(catalog: Catalog, pricing: PricingPolicy) -> Self {
        let selected_id = catalog.first().map(|o| o.id.clone());
        let energy_kwh = catalog
            .first()
            .map(|o| o.min_kwh)
            .unwrap_or(FALLBACK_ENERGY_KWH);

        Self {
            catalog,
            filter: CatalogFilter::default(),
            selected_id,
            energy_kwh,
            org: demo_org(),
            service: default_service(),
            tx: demo_transaction(),
            pricing,
            publish_state: PublishState::Idle,
        }
    }

    // ---- catalog ----

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn visible_offerings(&self) -> Vec<&Offering> {
        self.catalog.filter(&self.filter)
    }

    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn set_component_filter(&mut self, component: ComponentFilter) {
        self.filter.component = component;
    }

    pub fn set_only_available(&mut self, only_available: bool) {
        self.filter.only_available = only_available;
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
    }

    /// Adds a default block located in the organisation's city, selects it
    /// and resets the requested energy to its minimum.
    pub fn add_offering(&mut self) -> String {
        let offering = self.catalog.add(&self.org.location_details.city_or_district);
        let id = offering.id.clone();
        self.energy_kwh = offering.min_kwh;
        self.selected_id = Some(id.clone());
        tracing::info!("Added offering {}", id);
        id
    }

    pub fn remove_offering(&mut self, id: &str) -> Result<Offering> {
        let removed = self.catalog.remove(id)?;
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        }
        tracing::info!("Removed offering {}", id);
        Ok(removed)
    }

    pub fn update_offering(&mut self, id: &str, patch: OfferingPatch) -> Result<()> {
        self.catalog.update(id, patch)?;
        if self.selected_id.as_deref() == Some(id) {
            self.clamp_to_selection();
        }
        Ok(())
    }

    // ---- selection & energy ----

    pub fn selected(&self) -> Option<&Offering> {
        self.selected_id
            .as_deref()
            .and_then(|id| self.catalog.get(id))
    }

    /// Selecting keeps the requested energy inside the new offering's range.
    pub fn select(&mut self, id: &str) -> Result<()> {
        if self.catalog.get(id).is_none() {
            return Err(SellerError::OfferingNotFound { id: id.to_string() });
        }
        self.selected_id = Some(id.to_string());
        self.clamp_to_selection();
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected_id = None;
    }

    pub fn energy_kwh(&self) -> f64 {
        self.energy_kwh
    }

    /// Raw entry; the range is only enforced on selection changes and publish.
    pub fn set_energy(&mut self, energy_kwh: f64) {
        self.energy_kwh = energy_kwh;
    }

    pub fn set_energy_input(&mut self, raw: &str) -> Result<()> {
        self.energy_kwh = parse_quantity("energy_kwh", raw)?;
        Ok(())
    }

    fn clamp_to_selection(&mut self) {
        if let Some(offering) = self.selected() {
            let clamped = clamp_energy(self.energy_kwh, offering);
            if clamped != self.energy_kwh {
                tracing::debug!(
                    "Clamping energy {} -> {} kWh for {}",
                    self.energy_kwh,
                    clamped,
                    offering.id
                );
                self.energy_kwh = clamped;
            }
        }
    }

    // ---- pricing & payloads ----

    pub fn pricing(&self) -> &PricingPolicy {
        &self.pricing
    }

    /// Quote for the current energy against the selected offering; without
    /// a selection the unit price is zero.
    pub fn current_quote(&self) -> Quote {
        let price = self.selected().map(|o| o.price_per_kwh).unwrap_or(0.0);
        compute_totals(self.energy_kwh, price, &self.pricing)
    }

    pub fn preview_payload(&self) -> Option<OrderPayload> {
        let offering = self.selected()?;
        let quote = self.current_quote();
        Some(payload_for_offering(
            &self.org,
            &self.service,
            &self.tx,
            offering,
            &quote,
        ))
    }

    /// The records as edited, without any per-offering override.
    pub fn export_payload(&self) -> OrderPayload {
        build_order_payload(&self.org, &self.service, &self.tx)
    }

    // ---- records ----

    pub fn org(&self) -> &SupplierOrg {
        &self.org
    }

    pub fn org_mut(&mut self) -> &mut SupplierOrg {
        &mut self.org
    }

    pub fn service(&self) -> &ServiceSchema {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut ServiceSchema {
        &mut self.service
    }

    pub fn transaction(&self) -> &TransactionDetails {
        &self.tx
    }

    pub fn transaction_mut(&mut self) -> &mut TransactionDetails {
        &mut self.tx
    }

    pub fn refresh_timestamp(&mut self) {
        self.service.electrical_parameters.transaction_timestamp = now_iso();
    }

    // ---- publish state machine ----

    pub fn publish_state(&self) -> PublishState {
        self.publish_state
    }

    /// `Ok(None)` while a publish is already in flight.
    pub fn begin_publish(&mut self) -> Result<Option<PublishTicket>> {
        if self.publish_state == PublishState::Publishing {
            tracing::debug!("Publish already in progress, ignoring");
            return Ok(None);
        }

        let offering = self.selected().cloned().ok_or(SellerError::NoOfferingSelected)?;
        if !offering.available {
            return Err(SellerError::OfferingUnavailable { id: offering.id });
        }

        self.clamp_to_selection();
        let energy_kwh = self.energy_kwh;
        let quote = compute_totals(energy_kwh, offering.price_per_kwh, &self.pricing);
        let payload = publish_payload(&self.org, &self.service, &self.tx, &offering, &quote);

        self.publish_state = PublishState::Publishing;
        tracing::info!(
            "Publishing {} ({} kWh @ {}/kWh, total {:.2})",
            offering.id,
            energy_kwh,
            offering.price_per_kwh,
            quote.total
        );

        Ok(Some(PublishTicket {
            offering_id: offering.id,
            energy_kwh,
            price_per_kwh: offering.price_per_kwh,
            quote,
            payload,
        }))
    }

    /// Returns to idle. Only a successful submission refreshes the service
    /// timestamp and yields a notification.
    pub fn finish_publish(
        &mut self,
        ticket: PublishTicket,
        result: Result<SubmissionReceipt>,
    ) -> Result<PublishNotification> {
        self.publish_state = PublishState::Idle;
        match result {
            Ok(receipt) => {
                self.refresh_timestamp();
                tracing::info!("✅ Published {}", ticket.offering_id);
                Ok(PublishNotification::new(ticket, receipt))
            }
            Err(e) => {
                tracing::error!("❌ Publishing {} failed: {}", ticket.offering_id, e);
                Err(e)
            }
        }
    }

    /// Drops an in-flight publish without a notification or timestamp refresh.
    pub fn abort_publish(&mut self) {
        if self.publish_state == PublishState::Publishing {
            tracing::warn!("Publish cancelled before the submission completed");
            self.publish_state = PublishState::Idle;
        }
    }
}
