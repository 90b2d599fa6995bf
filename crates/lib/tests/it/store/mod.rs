pub mod save_load;
