use serde::{Deserialize, Serialize};

/// Payload of a feed row. The variant decides which detail the row carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActivityKind {
    Sale { amount: f64 },
    Customer { user: String },
    Payment { amount: f64 },
    Inventory { product: String },
    Marketing { campaign: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u32,
    pub title: String,
    pub time: String,
    #[serde(flatten)]
    pub kind: ActivityKind,
}

impl Activity {
    pub fn tag(&self) -> &'static str {
        match self.kind {
            ActivityKind::Sale { .. } => "sale",
            ActivityKind::Customer { .. } => "customer",
            ActivityKind::Payment { .. } => "payment",
            ActivityKind::Inventory { .. } => "inventory",
            ActivityKind::Marketing { .. } => "marketing",
        }
    }

    /// Money moved by this activity, if any.
    pub fn amount(&self) -> Option<f64> {
        match self.kind {
            ActivityKind::Sale { amount } | ActivityKind::Payment { amount } => Some(amount),
            _ => None,
        }
    }

    /// Secondary line shown under the title.
    pub fn detail(&self) -> String {
        match &self.kind {
            ActivityKind::Sale { amount } | ActivityKind::Payment { amount } => format!("${:.2}", amount),
            ActivityKind::Customer { user } => user.clone(),
            ActivityKind::Inventory { product } => product.clone(),
            ActivityKind::Marketing { campaign } => campaign.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_dispatches_on_kind() {
        let sale = Activity {
            id: 1,
            title: "New sale order #1234".into(),
            time: "2 hours ago".into(),
            kind: ActivityKind::Sale { amount: 1430.0 },
        };
        let promo = Activity {
            id: 5,
            title: "Marketing campaign launched".into(),
            time: "2 days ago".into(),
            kind: ActivityKind::Marketing { campaign: "Summer Sale 2023".into() },
        };
        assert_eq!(sale.detail(), "$1430.00");
        assert_eq!(sale.amount(), Some(1430.0));
        assert_eq!(promo.detail(), "Summer Sale 2023");
        assert_eq!(promo.amount(), None);
        assert_eq!(promo.tag(), "marketing");
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let row = Activity {
            id: 2,
            title: "New customer registered".into(),
            time: "3 hours ago".into(),
            kind: ActivityKind::Customer { user: "Emily Davis".into() },
        };
        let v = serde_json::to_value(&row).unwrap();
        assert_eq!(v["type"], "customer");
        assert_eq!(v["user"], "Emily Davis");
        assert_eq!(v["id"], 2);
    }
}
