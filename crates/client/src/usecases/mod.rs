pub mod u501_bulk_mrpc_update;
