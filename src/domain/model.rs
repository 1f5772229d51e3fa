use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SellerComponent {
    #[serde(rename = "VPP")]
    Vpp,
    #[serde(rename = "Micro-grid")]
    MicroGrid,
    #[serde(rename = "AC Charger")]
    AcCharger,
    #[serde(rename = "DC Charger")]
    DcCharger,
    #[serde(rename = "Battery Storage")]
    BatteryStorage,
}

impl SellerComponent {
    pub const ALL: [SellerComponent; 5] = [
        SellerComponent::Vpp,
        SellerComponent::MicroGrid,
        SellerComponent::AcCharger,
        SellerComponent::DcCharger,
        SellerComponent::BatteryStorage,
    ];

    /// Wire value, also what the catalog query matches against.
    pub fn as_str(&self) -> &'static str {
        match self {
            SellerComponent::Vpp => "VPP",
            SellerComponent::MicroGrid => "Micro-grid",
            SellerComponent::AcCharger => "AC Charger",
            SellerComponent::DcCharger => "DC Charger",
            SellerComponent::BatteryStorage => "Battery Storage",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SellerComponent::Vpp => "Virtual Power Plant",
            SellerComponent::MicroGrid => "Micro power plant",
            SellerComponent::AcCharger => "EV Charger (AC)",
            SellerComponent::DcCharger => "EV Charger (DC)",
            SellerComponent::BatteryStorage => "Battery storage",
        }
    }
}

impl fmt::Display for SellerComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SellerComponent {
    type Err = String;

    // Accepts the wire value in any case, with '-', '_' or ' ' as separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        SellerComponent::ALL
            .into_iter()
            .find(|c| c.as_str().replace(['-', ' '], "").to_lowercase() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown component '{}', expected one of: {}",
                    s,
                    SellerComponent::ALL
                        .iter()
                        .map(|c| c.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offering {
    pub id: String,
    pub component: SellerComponent,
    pub title: String,
    pub location: String,
    pub available: bool,
    pub min_kwh: f64,
    pub max_kwh: f64,
    pub price_per_kwh: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Field-by-field edit of an offering; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferingPatch {
    pub component: Option<SellerComponent>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub available: Option<bool>,
    pub min_kwh: Option<f64>,
    pub max_kwh: Option<f64>,
    pub price_per_kwh: Option<f64>,
    pub rating: Option<Option<f64>>,
    pub tags: Option<Option<Vec<String>>>,
}

impl Offering {
    pub fn apply(&mut self, patch: OfferingPatch) {
        if let Some(component) = patch.component {
            self.component = component;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(available) = patch.available {
            self.available = available;
        }
        if let Some(min_kwh) = patch.min_kwh {
            self.min_kwh = min_kwh;
        }
        if let Some(max_kwh) = patch.max_kwh {
            self.max_kwh = max_kwh;
        }
        if let Some(price) = patch.price_per_kwh {
            self.price_per_kwh = price;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
    }
}

// ------------------------------
// Organisation
// ------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplierOrg {
    pub organisation_name: String,
    pub short_name: String,
    pub type_of_organisation: String,
    pub registration_number: String,
    #[serde(rename = "PAN")]
    pub pan: String,
    pub location_details: LocationDetails,
    pub contact_information: ContactInformation,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationDetails {
    pub head_office_address: String,
    pub branch_or_regional_office: String,
    pub country: String,
    pub state_or_province: String,
    pub city_or_district: String,
    pub pin_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInformation {
    pub official_email: String,
    pub official_phone_number: String,
    pub website_url: String,
}

// ------------------------------
// Service schema
// ------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "INR")]
    Inr,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryId {
    #[default]
    #[serde(rename = "EV_ENERGY")]
    EvEnergy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfillmentType {
    #[default]
    OnFulfillment,
    OnDelivery,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSchema {
    pub descriptor: Descriptor,
    pub category_id: CategoryId,
    pub price: Price,
    pub fulfillment: Fulfillment,
    pub electrical_parameters: ElectricalParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    pub name: String,
    pub short_desc: String,
    pub long_desc: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub currency: Currency,
    pub value: f64,
}

impl Price {
    pub fn inr(value: f64) -> Self {
        Self {
            currency: Currency::Inr,
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fulfillment {
    #[serde(rename = "type")]
    pub fulfillment_type: FulfillmentType,
}

// Physical units are single-variant enums so that the unit strings survive a
// round trip exactly.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoltageUnit {
    #[default]
    Volts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurrentUnit {
    #[default]
    Amperes,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivePowerUnit {
    #[default]
    #[serde(rename = "kW")]
    Kw,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactivePowerUnit {
    #[default]
    #[serde(rename = "kVAR")]
    Kvar,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApparentPowerUnit {
    #[default]
    #[serde(rename = "kVA")]
    Kva,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrequencyUnit {
    #[default]
    Hz,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyUnit {
    #[default]
    #[serde(rename = "kWh")]
    Kwh,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement<U> {
    pub unit: U,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribedMeasurement<U> {
    pub unit: U,
    pub value: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerFactor {
    pub value: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricalParams {
    pub voltage: Measurement<VoltageUnit>,
    pub current: Measurement<CurrentUnit>,
    pub power_factor: PowerFactor,
    pub active_power: DescribedMeasurement<ActivePowerUnit>,
    pub reactive_power: DescribedMeasurement<ReactivePowerUnit>,
    pub apparent_power: DescribedMeasurement<ApparentPowerUnit>,
    pub frequency: Measurement<FrequencyUnit>,
    pub energy_transferred: DescribedMeasurement<EnergyUnit>,
    pub meter_reading: DescribedMeasurement<EnergyUnit>,
    pub transaction_timestamp: String,
}

// ------------------------------
// Transaction
// ------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Init,
    Confirmed,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Upi,
    Card,
    Neft,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub participant_id: String,
    pub organisation_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub amount: f64,
    pub currency: Currency,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDetails {
    pub buyer: Participant,
    pub seller: Participant,
    pub transaction_id: String,
    pub order_status: OrderStatus,
    pub payment: Payment,
}

/// The export document handed to the order-intake service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub organisation_details: SupplierOrg,
    pub service_schema: ServiceSchema,
    pub transaction_details: TransactionDetails,
}

impl OrderPayload {
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Current UTC time as `2024-05-01T10:20:30.123Z`.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
