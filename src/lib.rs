pub mod api;
pub mod config;
pub mod describe;
pub mod fs_json_util;
pub mod maimai;
