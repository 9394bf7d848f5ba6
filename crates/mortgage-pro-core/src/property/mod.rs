pub mod rent_vs_buy;
