pub mod fs_qr_store;
