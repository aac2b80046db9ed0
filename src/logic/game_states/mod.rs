pub mod buy_stock_state;
