use time::Date;
use uuid::Uuid;

/// Facts a rent receipt is rendered from. Pure input; the renderer has
/// no side effects.
#[derive(Debug, Clone)]
pub struct ReceiptFacts {
    pub transaction_id: Uuid,
    pub date: Date,
    pub tenant_name: String,
    pub tenant_room: Option<String>,
    pub amount: i64,
    pub month: String,
    pub payment_mode: Option<String>,
    pub owner_name: String,
}

pub trait ReceiptRenderer: Send + Sync {
    fn render(&self, facts: &ReceiptFacts) -> Vec<u8>;
}

/// Plain-text receipt body. PDF layout is an external concern; the
/// workflows only need bytes to attach.
pub struct TextReceiptRenderer;

impl ReceiptRenderer for TextReceiptRenderer {
    fn render(&self, facts: &ReceiptFacts) -> Vec<u8> {
        let mode = facts.payment_mode.as_deref().unwrap_or("N/A");
        let room = facts.tenant_room.as_deref().unwrap_or("N/A");
        format!(
            "RENT RECEIPT\n\
             ============\n\
             Receipt No : {}\n\
             Date       : {}\n\
             Received from {} (Room {})\n\
             Amount     : Rs. {}\n\
             For month  : {}\n\
             Mode       : {}\n\
             \n\
             {}\n",
            facts.transaction_id,
            facts.date,
            facts.tenant_name,
            room,
            facts.amount,
            facts.month,
            mode,
            facts.owner_name,
        )
        .into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    #[test]
    fn receipt_contains_the_facts() {
        let facts = ReceiptFacts {
            transaction_id: Uuid::nil(),
            date: Date::from_calendar_date(2025, Month::June, 1).unwrap(),
            tenant_name: "Asha Rao".into(),
            tenant_room: Some("101".into()),
            amount: 8500,
            month: "2025-06".into(),
            payment_mode: Some("UPI".into()),
            owner_name: "R. Mehta".into(),
        };

        let text = String::from_utf8(TextReceiptRenderer.render(&facts)).unwrap();
        assert!(text.contains("Asha Rao"));
        assert!(text.contains("Rs. 8500"));
        assert!(text.contains("2025-06"));
        assert!(text.contains("Room 101"));
    }
}
