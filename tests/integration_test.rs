//! 集成測試

use canplan::models::{
    AllocationStatus, EngineConfig, IncomingDelivery, Inventory, InventoryTransfer, ItemKind,
    Location, Order, OrderStatus, ProductLine, RollConfig, StockLevels,
};
use canplan::{compute_monthly_recommendation, compute_snapshots, summarize, AllocationCalculator};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn created(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 1, hour, 0, 0).unwrap()
}

fn order(number: &str, delivery: NaiveDate, sets: i64) -> Order {
    Order::new(number.to_string(), format!("{number} 顧客"), delivery, sets)
}

#[test]
fn test_depot_then_manufacturer_pickup() {
    // 場景：拠點有 100 枚底（無捲料），受注需要 150 套；メーカー有 2 支捲料

    // 1. 庫存
    let inventory = Inventory::new()
        .with_levels(Location::Office, ProductLine::Standard, StockLevels::new(150, 60, 0, 0))
        .with_levels(Location::Factory, ProductLine::Standard, StockLevels::new(0, 40, 0, 0))
        .with_levels(
            Location::Manufacturer,
            ProductLine::Standard,
            StockLevels::new(0, 0, 0, 2),
        );

    // 2. 受注
    let orders = vec![order("SO-001", date(2026, 11, 20), 150)];

    // 3. 執行引當
    let snapshots = compute_snapshots(&orders, &inventory).unwrap();

    // 4. 驗證結果
    assert_eq!(snapshots.len(), 1);
    let snapshot = &snapshots[0];
    assert_eq!(snapshot.bottom.from_depot, 100);
    assert_eq!(snapshot.bottom.from_manufacturer, 50);
    assert_eq!(snapshot.bottom.production_needed, 0);
    assert_eq!(snapshot.allocation_status, AllocationStatus::ManufacturerPickup);

    let summary = summarize(&snapshots);
    assert!(summary.has_shortage);
    assert_eq!(summary.total_bottom_lid_shortage, 0);
    assert_eq!(summary.affected_orders.len(), 1);
}

#[test]
fn test_production_needed_when_all_tiers_empty() {
    let inventory = Inventory::new().with_levels(
        Location::Office,
        ProductLine::Standard,
        StockLevels::new(150, 100, 0, 0),
    );
    let orders = vec![order("SO-001", date(2026, 11, 20), 150)];

    let snapshots = compute_snapshots(&orders, &inventory).unwrap();

    assert_eq!(snapshots[0].bottom.production_needed, 50);
    assert_eq!(snapshots[0].allocation_status, AllocationStatus::ProductionNeeded);

    let summary = summarize(&snapshots);
    assert_eq!(summary.total_body_shortage, 0);
    assert_eq!(summary.total_bottom_lid_shortage, 50);
}

#[test]
fn test_pail_bottom_and_lid_share_one_roll() {
    let inventory = Inventory::new().with_levels(
        Location::Factory,
        ProductLine::Pail,
        StockLevels::new(10, 0, 0, 1),
    );
    let orders = vec![order("P-001", date(2026, 11, 1), 10)
        .with_product_line(ProductLine::Pail)
        .with_additional_lids(10)];

    let snapshots = compute_snapshots(&orders, &inventory).unwrap();
    let snapshot = &snapshots[0];

    assert_eq!(snapshot.allocation_status, AllocationStatus::LocalOk);
    assert_eq!(snapshot.bottom.from_depot, 10);
    assert_eq!(snapshot.lid.from_depot, 10);
    assert!(snapshot.needs_cutting());
    // 捲料最多減少 1 支，剩餘部分以裁切完成品回到底與蓋
    assert_eq!(snapshot.depot_after.rolls, 0);
    assert!(snapshot.depot_after.bottom > 0);
    assert!(snapshot.depot_after.lid > 0);
    assert!(summarize(&snapshots).is_clear());
}

#[test]
fn test_same_delivery_date_earlier_creation_wins() {
    let inventory = Inventory::new().with_levels(
        Location::Office,
        ProductLine::Standard,
        StockLevels::new(30, 30, 0, 0),
    );
    let later = order("SO-LATE", date(2026, 11, 1), 30).with_created_at(created(10));
    let earlier = order("SO-EARLY", date(2026, 11, 1), 30).with_created_at(created(9));

    let snapshots = compute_snapshots(&[later, earlier], &inventory).unwrap();

    assert_eq!(snapshots[0].order_number, "SO-EARLY");
    assert_eq!(snapshots[0].allocation_status, AllocationStatus::LocalOk);
    assert_eq!(snapshots[1].order_number, "SO-LATE");
    assert_eq!(snapshots[1].body.production_needed, 30);
    assert_eq!(snapshots[1].allocation_status, AllocationStatus::ProductionNeeded);
}

#[test]
fn test_waterfall_across_many_orders() {
    // 場景：拠點 1 支捲料 + メーカー 1 支捲料，三筆受注依交期依序消耗
    let inventory = Inventory::new()
        .with_levels(Location::Office, ProductLine::Standard, StockLevels::new(500, 0, 0, 1))
        .with_levels(
            Location::Manufacturer,
            ProductLine::Standard,
            StockLevels::new(0, 0, 0, 1),
        );
    let orders = vec![
        order("SO-3", date(2026, 12, 10), 200),
        order("SO-1", date(2026, 11, 10), 200),
        order("SO-2", date(2026, 11, 20), 200),
    ];

    let result = AllocationCalculator::default()
        .calculate(&orders, &inventory)
        .unwrap();

    let statuses: Vec<_> = result
        .snapshots
        .iter()
        .map(|s| (s.order_number.as_str(), s.allocation_status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("SO-1", AllocationStatus::LocalOk),
            ("SO-2", AllocationStatus::ManufacturerPickup),
            ("SO-3", AllocationStatus::ProductionNeeded),
        ]
    );

    // SO-2：拠點剩 100 枚，メーカー開 1 支補 100 枚
    assert_eq!(result.snapshots[1].bottom.from_depot, 100);
    assert_eq!(result.snapshots[1].bottom.from_manufacturer, 100);
    // SO-3：底由メーカー開封後剩下的 200 枚補足，筒身不足 100
    assert_eq!(result.snapshots[2].bottom.from_manufacturer, 200);
    assert_eq!(result.snapshots[2].bottom.production_needed, 0);
    assert_eq!(result.snapshots[2].body.production_needed, 100);
    assert_eq!(result.summary.total_body_shortage, 100);
    assert_eq!(result.summary.total_bottom_lid_shortage, 0);
}

#[test]
fn test_production_alert_from_calculation() {
    let inventory = Inventory::new();
    let orders = vec![
        order("SO-1", date(2026, 12, 1), 100).with_additional_lids(50),
        order("SO-2", date(2027, 5, 1), 300),
    ];
    let calculator = AllocationCalculator::default();
    let result = calculator.calculate(&orders, &inventory).unwrap();

    let alert = calculator
        .production_alert(&result.snapshots, date(2026, 10, 18))
        .unwrap()
        .unwrap();

    assert_eq!(alert.total_body, 400);
    assert_eq!(alert.total_bottom_lid, 450);
    // (400 底 + 50 蓋) / 300 → 2 支
    assert_eq!(alert.estimated_rolls, 2);
    assert_eq!(alert.earliest_delivery, date(2026, 12, 1));
    assert!(alert.is_urgent);
}

#[test]
fn test_monthly_recommendation_end_to_end() {
    let today = date(2026, 10, 18);
    let inventory = Inventory::new()
        .with_levels(Location::Office, ProductLine::Standard, StockLevels::new(100, 100, 20, 0))
        .with_levels(Location::Factory, ProductLine::Pail, StockLevels::new(50, 0, 0, 1))
        .with_levels(
            Location::Manufacturer,
            ProductLine::Standard,
            StockLevels::new(10_000, 0, 0, 100),
        );
    let orders = vec![
        // 逾期未出貨
        order("OLD", date(2026, 10, 10), 60),
        // 期間內
        order("SO-1", date(2026, 10, 30), 100).with_additional_lids(50),
        order("P-1", date(2026, 11, 15), 40)
            .with_product_line(ProductLine::Pail)
            .with_additional_lids(40),
        // 已完成，不計入
        order("DONE", date(2026, 11, 1), 999).with_status(OrderStatus::Completed),
        // 期間外
        order("SO-FAR", date(2027, 1, 5), 500),
    ];

    let recommendation = compute_monthly_recommendation(&orders, &inventory, today).unwrap();

    assert_eq!(recommendation.target_period.end, date(2026, 11, 30));
    assert_eq!(recommendation.overdue_orders.len(), 1);
    assert_eq!(recommendation.window_orders.len(), 2);

    // 標準品：逾期受注用掉 60，剩筒身 40、底 40、蓋 20
    let standard = recommendation.line(ProductLine::Standard).unwrap();
    assert_eq!(standard.depot_available.body, 40);
    assert_eq!(standard.shortage.body, 60);
    assert_eq!(standard.shortage.bottom, 60);
    assert_eq!(standard.shortage.lid, 30);
    assert_eq!(standard.recommended.bottom_lid_pieces, 90);
    assert_eq!(standard.recommended.bottom_lid_rolls, 1);
    assert_eq!(standard.recommended.bottom_lid_meters, Decimal::from(200));

    // 提桶：1 支捲料足夠切出底 40 + 蓋 40
    let pail = recommendation.line(ProductLine::Pail).unwrap();
    assert!(pail.recommended.is_empty());
    assert!(recommendation.needs_order());
}

#[test]
fn test_movements_then_recompute() {
    // 場景：工場入荷捲料後重新計算，原本需要メーカー取貨的受注變成拠點即可
    let inventory = Inventory::new()
        .with_levels(Location::Office, ProductLine::Standard, StockLevels::new(20, 0, 0, 0))
        .with_levels(
            Location::Manufacturer,
            ProductLine::Standard,
            StockLevels::new(0, 0, 0, 3),
        );
    let orders = vec![order("SO-1", date(2026, 11, 1), 20)];

    let before = compute_snapshots(&orders, &inventory).unwrap();
    assert_eq!(before[0].allocation_status, AllocationStatus::ManufacturerPickup);

    let delivery = IncomingDelivery::new(
        Location::Factory,
        ProductLine::Standard,
        ItemKind::Rolls,
        1,
        date(2026, 10, 20),
    );
    let received = delivery.apply(&inventory).unwrap();
    assert_eq!(received.manufacturer.standard.rolls, 2);

    let transfer = InventoryTransfer::new(
        Location::Factory,
        Location::Office,
        ProductLine::Standard,
        ItemKind::Rolls,
        1,
    );
    let moved = transfer.apply(&received).unwrap();
    assert_eq!(moved.office.standard.rolls, 1);

    let after = compute_snapshots(&orders, &moved).unwrap();
    assert_eq!(after[0].allocation_status, AllocationStatus::LocalOk);
    assert!(after[0].needs_cutting());
}

#[test]
fn test_custom_config_from_json() {
    let json = r#"{
        "roll_configs": [
            { "product_line": "standard", "roll_length_m": "100",
              "bottom_yield": 150, "lid_yield": 150, "pieces_per_meter": "1.5" },
            { "product_line": "pail", "roll_length_m": "200",
              "bottom_yield": 655, "lid_yield": 606, "pieces_per_meter": null }
        ],
        "manufacturer_lead_time_months": 2
    }"#;
    let config = EngineConfig::from_json(json).unwrap();
    let calculator = AllocationCalculator::new(config).unwrap();

    let inventory = Inventory::new().with_levels(
        Location::Office,
        ProductLine::Standard,
        StockLevels::new(200, 0, 0, 1),
    );
    let orders = vec![order("SO-1", date(2026, 11, 1), 200)];

    let result = calculator.calculate(&orders, &inventory).unwrap();

    // 1 支只能切 150 枚
    assert_eq!(result.snapshots[0].bottom.from_depot, 150);
    assert_eq!(result.snapshots[0].bottom.production_needed, 50);

    let recommendation = calculator
        .monthly_recommendation(&orders, &inventory, date(2026, 10, 18))
        .unwrap();
    let standard = recommendation.line(ProductLine::Standard).unwrap();
    assert_eq!(standard.recommended.bottom_lid_rolls, 1);
    assert_eq!(standard.recommended.bottom_lid_meters, Decimal::from(100));
}

#[test]
fn test_missing_roll_config_is_fatal() {
    let config = EngineConfig::new().with_roll_config(RollConfig::standard());
    let calculator = AllocationCalculator::new(config).unwrap();
    let orders = vec![
        order("SO-1", date(2026, 11, 1), 1),
        order("P-1", date(2026, 11, 2), 1).with_product_line(ProductLine::Pail),
    ];

    let result = calculator.calculate(&orders, &Inventory::new());
    assert!(matches!(
        result,
        Err(canplan::CanplanError::RollConfigNotFound(ProductLine::Pail))
    ));
}

#[test]
fn test_snapshot_serialization_contract() {
    let inventory = Inventory::new();
    let orders = vec![order("SO-1", date(2026, 11, 1), 5)];

    let snapshots = compute_snapshots(&orders, &inventory).unwrap();
    let json = serde_json::to_value(&snapshots[0]).unwrap();

    assert_eq!(json["allocation_status"], "production_needed");
    assert_eq!(json["product_line"], "standard");
    assert_eq!(json["delivery_date"], "2026-11-01");
    assert_eq!(json["body"]["production_needed"], 5);
}

#[test]
fn test_identical_inputs_identical_output() {
    let inventory = Inventory::new()
        .with_levels(Location::Office, ProductLine::Pail, StockLevels::new(30, 5, 5, 2))
        .with_levels(Location::Manufacturer, ProductLine::Pail, StockLevels::new(30, 0, 0, 2));
    let base = created(0);
    let orders: Vec<Order> = (0..10)
        .map(|i| {
            order(&format!("P-{i}"), date(2026, 11, 1 + (i % 3)), 100)
                .with_product_line(ProductLine::Pail)
                .with_additional_lids(i64::from(i) * 40)
                .with_created_at(base + Duration::minutes(i64::from(i)))
        })
        .collect();

    let first = compute_snapshots(&orders, &inventory).unwrap();
    let second = compute_snapshots(&orders, &inventory).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[rstest]
#[case(date(2026, 10, 18), date(2026, 11, 30))]
#[case(date(2026, 12, 31), date(2027, 1, 31))]
#[case(date(2027, 1, 31), date(2027, 2, 28))]
#[case(date(2028, 1, 1), date(2028, 2, 29))]
fn test_monthly_window_end(#[case] today: NaiveDate, #[case] expected_end: NaiveDate) {
    let recommendation = compute_monthly_recommendation(&[], &Inventory::new(), today).unwrap();

    assert_eq!(recommendation.target_period.start, today);
    assert_eq!(recommendation.target_period.end, expected_end);
}

proptest! {
    #[test]
    fn prop_later_orders_never_reduce_earlier_allocation(
        depot_rolls in 0i64..4,
        maker_rolls in 0i64..4,
        first in (0i64..600, 0i64..600),
        later in prop::collection::vec((0i64..600, 0i64..600), 1..5),
    ) {
        let inventory = Inventory::new()
            .with_levels(
                Location::Office,
                ProductLine::Pail,
                StockLevels::new(300, 50, 50, depot_rolls),
            )
            .with_levels(
                Location::Manufacturer,
                ProductLine::Pail,
                StockLevels::new(300, 0, 0, maker_rolls),
            );
        let head = order("HEAD", date(2026, 11, 1), first.0)
            .with_product_line(ProductLine::Pail)
            .with_additional_lids(first.1);
        let mut orders: Vec<Order> = later
            .iter()
            .enumerate()
            .map(|(i, (sets, lids))| {
                order(&format!("P-{i}"), date(2026, 11, 2), *sets)
                    .with_product_line(ProductLine::Pail)
                    .with_additional_lids(*lids)
            })
            .collect();

        let alone = compute_snapshots(std::slice::from_ref(&head), &inventory).unwrap();
        orders.push(head);
        let together = compute_snapshots(&orders, &inventory).unwrap();

        prop_assert_eq!(&together[0], &alone[0]);
    }
}
