pub mod invoice_screen;
pub mod invoice_view;
pub mod order_state;
pub mod order_store;
