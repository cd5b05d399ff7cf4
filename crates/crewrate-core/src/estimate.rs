//! Job estimates priced from a previously computed hourly rate.
//!
//! Labor lines are billed at the estimate's hourly rate, which already
//! embeds the business margin, so markup on labor lines is ignored.
//! Material and equipment lines are billed at cost plus their markup.

use serde::{Deserialize, Serialize};

use crate::enums::{LineItemKind, ServiceType};

fn default_quantity() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateLineItem {
    pub description: String,

    #[serde(default)]
    pub kind: LineItemKind,

    /// Hours for labor lines, units otherwise.
    #[serde(default = "default_quantity")]
    pub quantity: f64,

    /// Cost per unit. Unused for labor lines.
    #[serde(default)]
    pub unit_cost: f64,

    /// Markup over cost in percent. `None` takes the caller's default.
    #[serde(default)]
    pub markup_percent: Option<f64>,
}

impl EstimateLineItem {
    pub fn labor(description: impl Into<String>, hours: f64) -> Self {
        Self {
            description: description.into(),
            kind: LineItemKind::Labor,
            quantity: hours,
            unit_cost: 0.0,
            markup_percent: None,
        }
    }

    pub fn material(
        description: impl Into<String>,
        quantity: f64,
        unit_cost: f64,
        markup_percent: f64,
    ) -> Self {
        Self {
            description: description.into(),
            kind: LineItemKind::Material,
            quantity,
            unit_cost,
            markup_percent: Some(markup_percent),
        }
    }

    /// Cost before markup. Labor lines have no separate cost.
    pub fn cost(&self, hourly_rate: f64) -> f64 {
        match self.kind {
            LineItemKind::Labor => self.quantity * hourly_rate,
            _ => self.quantity * self.unit_cost,
        }
    }

    /// Price charged to the client for this line.
    pub fn price(&self, hourly_rate: f64, default_markup: f64) -> f64 {
        match self.kind {
            LineItemKind::Labor => self.cost(hourly_rate),
            _ => {
                let markup = self.markup_percent.unwrap_or(default_markup);
                self.cost(hourly_rate) * (1.0 + markup / 100.0)
            }
        }
    }
}

/// Aggregated prices of an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct EstimateTotals {
    pub labor: f64,
    pub materials: f64,
    pub equipment: f64,
    /// Portion of materials and equipment that is markup.
    pub markup: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub name: String,

    #[serde(default)]
    pub service_type: ServiceType,

    /// Crew whose rate should price the labor, by name or slug.
    #[serde(default)]
    pub crew: Option<String>,

    /// Hourly rate used for labor lines. Filled from the rate store when
    /// absent.
    #[serde(default)]
    pub hourly_rate: Option<f64>,

    #[serde(default)]
    pub line_items: Vec<EstimateLineItem>,
}

impl Estimate {
    /// Totals for the estimate at `hourly_rate`, applying `default_markup` to
    /// lines that do not set their own.
    pub fn totals(&self, hourly_rate: f64, default_markup: f64) -> EstimateTotals {
        let mut totals = EstimateTotals::default();
        for item in &self.line_items {
            let price = item.price(hourly_rate, default_markup);
            match item.kind {
                LineItemKind::Labor => totals.labor += price,
                LineItemKind::Material => totals.materials += price,
                LineItemKind::Equipment => totals.equipment += price,
            }
            if item.kind != LineItemKind::Labor {
                totals.markup += price - item.cost(hourly_rate);
            }
        }
        totals.total = totals.labor + totals.materials + totals.equipment;
        totals
    }

    /// Total labor hours on the estimate.
    pub fn labor_hours(&self) -> f64 {
        self.line_items
            .iter()
            .filter(|i| i.kind == LineItemKind::Labor)
            .map(|i| i.quantity)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Estimate {
        Estimate {
            name: "Water heater swap".into(),
            service_type: ServiceType::Plumbing,
            crew: None,
            hourly_rate: None,
            line_items: vec![
                EstimateLineItem::labor("Remove and install", 4.0),
                EstimateLineItem::material("50 gal heater", 1.0, 800.0, 25.0),
                EstimateLineItem {
                    description: "Fittings".into(),
                    kind: LineItemKind::Material,
                    quantity: 4.0,
                    unit_cost: 10.0,
                    markup_percent: None,
                },
                EstimateLineItem {
                    description: "Dolly rental".into(),
                    kind: LineItemKind::Equipment,
                    quantity: 1.0,
                    unit_cost: 50.0,
                    markup_percent: Some(0.0),
                },
            ],
        }
    }

    #[test]
    fn totals_split_by_kind() {
        let totals = sample().totals(100.0, 50.0);
        assert_eq!(
            totals,
            EstimateTotals {
                labor: 400.0,
                materials: 1060.0,
                equipment: 50.0,
                markup: 220.0,
                total: 1510.0,
            }
        );
    }

    #[test]
    fn labor_ignores_markup() {
        let mut item = EstimateLineItem::labor("Dig", 2.0);
        item.markup_percent = Some(100.0);
        assert_eq!(item.price(80.0, 10.0), 160.0);
    }

    #[test]
    fn labor_hours_sum() {
        assert_eq!(sample().labor_hours(), 4.0);
    }

    #[test]
    fn empty_estimate_totals_zero() {
        let estimate = Estimate {
            line_items: Vec::new(),
            ..sample()
        };
        assert_eq!(estimate.totals(120.0, 20.0), EstimateTotals::default());
    }

    #[test]
    fn line_item_defaults() {
        let item: EstimateLineItem =
            serde_json::from_str(r#"{"description": "Inspection"}"#).unwrap();
        assert_eq!(item.kind, LineItemKind::Labor);
        assert_eq!(item.quantity, 1.0);
        assert_eq!(item.markup_percent, None);
    }
}
