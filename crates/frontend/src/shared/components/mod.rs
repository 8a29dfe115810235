pub mod breakdown_table;
pub mod data_state;
pub mod page_header;
pub mod pagination_controls;
pub mod records_table;
pub mod stat_card;
