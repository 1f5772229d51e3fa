use energy_seller::core::payload::{payload_for_offering, publish_payload};
use energy_seller::core::Storage;
use energy_seller::domain::defaults::{default_service, demo_org, demo_transaction};
use energy_seller::domain::model::{FulfillmentType, OrderStatus, PaymentMethod};
use energy_seller::{
    build_order_payload, compute_totals, Catalog, LocalStorage, OrderPayload, PricingPolicy,
    SellerSession,
};
use serde_json::Value;
use tempfile::TempDir;

#[test]
fn test_export_document_round_trip() {
    let mut org = demo_org();
    org.organisation_name = "Kerala Grid Co".to_string();
    org.pan = "ABCDE1234F".to_string();
    org.contact_information.official_email = "ops@keralagrid.example".to_string();

    let mut service = default_service();
    service.fulfillment.fulfillment_type = FulfillmentType::OnDelivery;
    service.electrical_parameters.voltage.value = 230.0;

    let mut tx = demo_transaction();
    tx.order_status = OrderStatus::Confirmed;
    tx.payment.payment_method = PaymentMethod::Neft;
    tx.buyer.participant_id = "buyer.fleet".to_string();

    let payload = build_order_payload(&org, &service, &tx);
    let text = payload.to_pretty_json().unwrap();

    let value: Value = serde_json::from_str(&text).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 3);

    assert_eq!(
        serde_json::from_value::<energy_seller::domain::model::SupplierOrg>(
            object["organisation_details"].clone()
        )
        .unwrap(),
        org
    );
    assert_eq!(object["organisation_details"]["PAN"], "ABCDE1234F");
    assert_eq!(object["service_schema"]["fulfillment"]["type"], "ON_DELIVERY");
    assert_eq!(
        object["service_schema"]["electrical_parameters"]["voltage"]["unit"],
        "Volts"
    );
    assert_eq!(object["transaction_details"]["order_status"], "CONFIRMED");
    assert_eq!(object["transaction_details"]["payment"]["payment_method"], "NEFT");

    let back: OrderPayload = serde_json::from_str(&text).unwrap();
    assert_eq!(back, payload);
}

#[test]
fn test_overrides_touch_only_price_amount_and_seller() {
    let org = demo_org();
    let service = default_service();
    let tx = demo_transaction();
    let catalog = Catalog::new(energy_seller::domain::defaults::initial_offerings());
    let offering = catalog.get("off-002").unwrap();
    let q = compute_totals(50.0, offering.price_per_kwh, &PricingPolicy::default());

    let plain = serde_json::to_value(build_order_payload(&org, &service, &tx)).unwrap();
    let preview = serde_json::to_value(payload_for_offering(&org, &service, &tx, offering, &q)).unwrap();
    let published = serde_json::to_value(publish_payload(&org, &service, &tx, offering, &q)).unwrap();

    let mut expected_preview = plain.clone();
    expected_preview["service_schema"]["price"]["value"] = serde_json::json!(offering.price_per_kwh);
    expected_preview["transaction_details"]["payment"]["amount"] = serde_json::json!(q.total);
    assert_eq!(preview, expected_preview);

    let mut expected_published = expected_preview.clone();
    expected_published["transaction_details"]["seller"] = serde_json::json!({
        "participant_id": "seller.chargemod",
        "organisation_name": "Supplier Org"
    });
    assert_eq!(published, expected_published);
}

#[test]
fn test_catalog_file_and_preview_export() {
    let dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());

    let catalog_json = serde_json::json!([
        {
            "id": "off-kochi",
            "component": "DC Charger",
            "title": "Harbour DC Slot",
            "location": "Kochi",
            "available": true,
            "minKwh": 20,
            "maxKwh": 60,
            "pricePerKwh": 15.0,
            "tags": ["Fast"]
        }
    ]);

    tokio_test::block_on(async {
        tokio_test::assert_ok!(
            storage
                .write_file("catalog.json", catalog_json.to_string().as_bytes())
                .await
        );

        let data = storage.read_file("catalog.json").await.unwrap();
        let catalog = Catalog::from_json(&data).unwrap();
        let mut session = SellerSession::with_catalog(catalog, PricingPolicy::default());
        assert_eq!(session.selected().unwrap().id, "off-kochi");
        assert_eq!(session.energy_kwh(), 20.0);

        session.set_energy(30.0);
        let preview = session.preview_payload().unwrap();
        assert_eq!(preview.service_schema.price.value, 15.0);

        let json = preview.to_pretty_json().unwrap();
        tokio_test::assert_ok!(storage.write_file("out/preview.json", json.as_bytes()).await);

        let saved = storage.read_file("out/preview.json").await.unwrap();
        let reread: OrderPayload = serde_json::from_slice(&saved).unwrap();
        assert_eq!(reread, preview);
    });
}

#[test]
fn test_malformed_catalog_is_rejected() {
    let err = Catalog::from_json(br#"[{"id": "x", "component": "Wind"}]"#).unwrap_err();
    assert!(matches!(err, energy_seller::SellerError::SerializationError(_)));
}
