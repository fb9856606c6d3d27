//! 引當與月次發注建議示例
//!
//! 執行：`RUST_LOG=debug cargo run --example monthly_plan`

use anyhow::Context;
use canplan::models::{Inventory, Location, Order, ProductLine, StockLevels};
use canplan::AllocationCalculator;
use chrono::{Local, NaiveDate};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();

    println!("=== 引當與月次發注建議示例 ===\n");

    let today = Local::now().date_naive();
    let day = |offset: i64| today + chrono::Duration::days(offset);

    // 庫存
    let inventory = Inventory::new()
        .with_levels(Location::Office, ProductLine::Standard, StockLevels::new(120, 80, 40, 1))
        .with_levels(Location::Factory, ProductLine::Standard, StockLevels::new(60, 0, 0, 1))
        .with_levels(Location::Factory, ProductLine::Pail, StockLevels::new(30, 0, 0, 1))
        .with_levels(
            Location::Manufacturer,
            ProductLine::Standard,
            StockLevels::new(200, 0, 0, 2),
        );

    // 受注
    let orders = vec![
        order("SO-101", "山田商事", day(-5), 50, 0),
        order("SO-102", "鈴木工業", day(7), 120, 60),
        order("SO-103", "佐藤物産", day(20), 150, 0),
        order("P-201", "田中化成", day(10), 25, 25).with_product_line(ProductLine::Pail),
    ];

    let calculator = AllocationCalculator::default();

    let result = calculator
        .calculate(&orders, &inventory)
        .context("引當計算失敗")?;

    println!("受注別引當結果:");
    for snapshot in &result.snapshots {
        println!(
            "  - {} {} 交期 {} [{:?}] 筒身不足 {}，底・蓋不足 {}{}",
            snapshot.order_number,
            snapshot.customer_name,
            snapshot.delivery_date,
            snapshot.allocation_status,
            snapshot.body_shortage(),
            snapshot.bottom_lid_shortage(),
            if snapshot.needs_cutting() { "（需裁切）" } else { "" }
        );
    }
    for warning in &result.warnings {
        println!("  ! {}: {}", warning.subject, warning.message);
    }

    if let Some(alert) = calculator.production_alert(&result.snapshots, today)? {
        println!(
            "\nメーカー生產必要：筒身 {}，底・蓋 {}（約 {} 支），最早交期 {}{}",
            alert.total_body,
            alert.total_bottom_lid,
            alert.estimated_rolls,
            alert.earliest_delivery,
            if alert.is_urgent { "【緊急】" } else { "" }
        );
    }

    let recommendation = calculator
        .monthly_recommendation(&orders, &inventory, today)
        .context("月次發注建議計算失敗")?;

    println!(
        "\n月次發注建議（{} ～ {}）:",
        recommendation.target_period.start, recommendation.target_period.end
    );
    for plan in &recommendation.lines {
        let purchase = &plan.recommended;
        println!(
            "  - {}: 筒身 {} 枚，底・蓋 {} 枚 = 捲料 {} 支（{} m）",
            plan.product_line,
            purchase.body_pieces,
            purchase.bottom_lid_pieces,
            purchase.bottom_lid_rolls,
            purchase.bottom_lid_meters
        );
    }

    Ok(())
}

fn order(number: &str, customer: &str, delivery: NaiveDate, sets: i64, lids: i64) -> Order {
    Order::new(number.to_string(), customer.to_string(), delivery, sets).with_additional_lids(lids)
}
