pub mod billing_cycle;
pub mod charts;
pub mod clickable_rows;
pub mod selection_total;
pub mod summary_cards;
pub mod toast;
