use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{
        consumption::{ConsumptionProfile, MONTH_NAMES},
        portfolio::SiteRecord,
        rate_table::MonthlyRate,
        report::{CostReport, Verdict},
    },
    fmt::MonthLabel,
    quantity::{cost::Cost, rate::PriceUnit},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

/// Green when the client side is cheaper.
fn difference_color(difference: Cost) -> Color {
    if difference > Cost::ZERO {
        Color::Green
    } else if difference < Cost::ZERO {
        Color::Red
    } else {
        Color::Reset
    }
}

#[must_use]
pub fn build_monthly_rates_table(
    monthly_rates: &[MonthlyRate],
    price_unit: PriceUnit,
    volume_unit: &str,
) -> Table {
    let unit = format!("{}/{volume_unit}", price_unit.symbol());
    let mut table = new_table();
    table.set_header(vec![
        Cell::from("Month"),
        Cell::from(format!("Wholesale, {unit}")).set_alignment(CellAlignment::Right),
        Cell::from(format!("Utility, {unit}")).set_alignment(CellAlignment::Right),
    ]);
    for monthly_rate in monthly_rates {
        table.add_row(vec![
            Cell::new(MonthLabel(monthly_rate.month)),
            Cell::new(monthly_rate.wholesale_rate).set_alignment(CellAlignment::Right).fg(
                if monthly_rate.wholesale_rate < monthly_rate.utility_rate {
                    Color::Green
                } else {
                    Color::Reset
                },
            ),
            Cell::new(monthly_rate.utility_rate).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Monthly volumes, next to the equal split when the client side is redistributed.
#[must_use]
pub fn build_consumption_table(
    consumption: &ConsumptionProfile,
    redistributed: bool,
    volume_unit: &str,
) -> Table {
    let mut header = vec![
        Cell::from("Month"),
        Cell::from(format!("Volume, {volume_unit}")).set_alignment(CellAlignment::Right),
    ];
    if redistributed {
        header.push(
            Cell::from(format!("Client volume, {volume_unit}"))
                .set_alignment(CellAlignment::Right),
        );
    }
    let mut table = new_table();
    table.set_header(header);

    let client_consumption = consumption.redistributed();
    for ((name, (_, volume)), (_, client_volume)) in
        MONTH_NAMES.iter().zip(consumption.iter()).zip(client_consumption.iter())
    {
        let mut row = vec![Cell::new(name), Cell::new(volume).set_alignment(CellAlignment::Right)];
        if redistributed {
            row.push(
                Cell::new(client_volume)
                    .set_alignment(CellAlignment::Right)
                    .add_attribute(Attribute::Dim),
            );
        }
        table.add_row(row);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(consumption.total())
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
    ]);
    table
}

#[must_use]
pub fn build_costs_table(report: &CostReport) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::from("Month"),
        Cell::from("Utility cost").set_alignment(CellAlignment::Right),
        Cell::from("Client cost").set_alignment(CellAlignment::Right),
        Cell::from("Difference").set_alignment(CellAlignment::Right),
        Cell::from("Hedged"),
    ]);
    for row in &report.rows {
        let difference = row.difference();
        table.add_row(vec![
            Cell::new(MonthLabel(row.month)),
            Cell::new(row.utility_cost).set_alignment(CellAlignment::Right),
            Cell::new(row.client_cost).set_alignment(CellAlignment::Right),
            Cell::new(difference)
                .set_alignment(CellAlignment::Right)
                .fg(difference_color(difference)),
            if row.hedged { Cell::new("yes") } else { Cell::new("") },
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(report.totals.utility_cost)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
        Cell::new(report.totals.client_cost)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
        Cell::new(report.difference)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold)
            .fg(difference_color(report.difference)),
        Cell::new(""),
    ]);
    table
}

#[must_use]
pub fn build_verdict_table(verdict: Verdict) -> Table {
    let color = match verdict {
        Verdict::Saved(_) => Color::Green,
        Verdict::SpentMore(_) => Color::Red,
        Verdict::NoDifference => Color::Reset,
    };
    let mut table = new_table();
    table.add_row(vec![Cell::new(verdict).add_attribute(Attribute::Bold).fg(color)]);
    table
}

#[must_use]
pub fn build_clients_table(records: &[SiteRecord]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::from("Client"),
        Cell::from("Province"),
        Cell::from("Commodity"),
        Cell::from("Site"),
        Cell::from("Contract start"),
        Cell::from("Admin fee").set_alignment(CellAlignment::Right),
        Cell::from("Annual volume").set_alignment(CellAlignment::Right),
    ]);
    for record in records {
        table.add_row(vec![
            Cell::new(&record.client_name).add_attribute(Attribute::Bold),
            Cell::new(record.province),
            Cell::new(record.commodity),
            Cell::new(&record.site_id),
            Cell::new(record.contract_start_date).add_attribute(Attribute::Dim),
            Cell::new(record.admin_fee).set_alignment(CellAlignment::Right),
            Cell::new(record.consumption.total()).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
