// Seed data for a fresh session.

use super::model::*;

pub fn demo_org() -> SupplierOrg {
    SupplierOrg {
        location_details: LocationDetails {
            country: "India".to_string(),
            state_or_province: "Karnataka".to_string(),
            city_or_district: "Bengaluru".to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn demo_electrical_params(timestamp: String) -> ElectricalParams {
    ElectricalParams {
        voltage: Measurement {
            unit: VoltageUnit::Volts,
            value: 415.0,
        },
        current: Measurement {
            unit: CurrentUnit::Amperes,
            value: 32.0,
        },
        power_factor: PowerFactor {
            value: 0.95,
            description: "Ratio of real power to apparent power".to_string(),
        },
        active_power: DescribedMeasurement {
            unit: ActivePowerUnit::Kw,
            value: 20.0,
            description: "The actual power consumed or generated".to_string(),
        },
        reactive_power: DescribedMeasurement {
            unit: ReactivePowerUnit::Kvar,
            value: 5.0,
            description: "Reactive power component".to_string(),
        },
        apparent_power: DescribedMeasurement {
            unit: ApparentPowerUnit::Kva,
            value: 21.0,
            description: "Combined effect of active and reactive power".to_string(),
        },
        frequency: Measurement {
            unit: FrequencyUnit::Hz,
            value: 50.0,
        },
        energy_transferred: DescribedMeasurement {
            unit: EnergyUnit::Kwh,
            value: 0.0,
            description: "The amount of electrical energy delivered/sold".to_string(),
        },
        meter_reading: DescribedMeasurement {
            unit: EnergyUnit::Kwh,
            value: 0.0,
            description: "Meter measurement used for billing".to_string(),
        },
        transaction_timestamp: timestamp,
    }
}

pub fn default_service() -> ServiceSchema {
    ServiceSchema {
        descriptor: Descriptor {
            name: "EV Energy Charging or Selling Service".to_string(),
            short_desc: "Provision to buy or sell electrical energy for EV stations".to_string(),
            long_desc: "Platform for trading electrical energy between EV charging stations, \
                        buyers, and sellers using Beckn Protocol."
                .to_string(),
        },
        category_id: CategoryId::EvEnergy,
        price: Price::inr(0.0),
        fulfillment: Fulfillment {
            fulfillment_type: FulfillmentType::OnFulfillment,
        },
        electrical_parameters: demo_electrical_params(now_iso()),
    }
}

pub fn demo_transaction() -> TransactionDetails {
    TransactionDetails {
        buyer: Participant::default(),
        seller: Participant::default(),
        transaction_id: "txn-123456".to_string(),
        order_status: OrderStatus::Init,
        payment: Payment {
            amount: 0.0,
            currency: Currency::Inr,
            payment_status: PaymentStatus::Pending,
            payment_method: PaymentMethod::Upi,
        },
    }
}

#[allow(clippy::too_many_arguments)]
fn seed(
    id: &str,
    component: SellerComponent,
    title: &str,
    location: &str,
    available: bool,
    (min_kwh, max_kwh): (f64, f64),
    price_per_kwh: f64,
    rating: f64,
    tags: &[&str],
) -> Offering {
    Offering {
        id: id.to_string(),
        component,
        title: title.to_string(),
        location: location.to_string(),
        available,
        min_kwh,
        max_kwh,
        price_per_kwh,
        rating: Some(rating),
        tags: if tags.is_empty() {
            None
        } else {
            Some(tags.iter().map(|t| t.to_string()).collect())
        },
    }
}

pub fn initial_offerings() -> Vec<Offering> {
    vec![
        seed(
            "off-001",
            SellerComponent::Vpp,
            "chargeMOD Virtual Power Plant Block",
            "Bengaluru",
            true,
            (10.0, 500.0),
            12.5,
            4.7,
            &["Low-carbon", "Best for bulk"],
        ),
        seed(
            "off-002",
            SellerComponent::MicroGrid,
            "SunSpark Micro-grid (Solar mix)",
            "Mysuru",
            true,
            (5.0, 150.0),
            11.9,
            4.4,
            &["Green"],
        ),
        seed(
            "off-003",
            SellerComponent::DcCharger,
            "120 kW DC Fast Charger Slot",
            "Kochi",
            false,
            (20.0, 200.0),
            14.2,
            4.3,
            &["High power"],
        ),
        seed(
            "off-004",
            SellerComponent::AcCharger,
            "Type-2 AC Charger Window",
            "Coimbatore",
            true,
            (2.0, 40.0),
            10.8,
            4.1,
            &[],
        ),
        seed(
            "off-005",
            SellerComponent::BatteryStorage,
            "1 MWh BESS Discharge Block",
            "Bengaluru",
            true,
            (50.0, 1000.0),
            13.0,
            4.5,
            &["Peak shaving"],
        ),
    ]
}
