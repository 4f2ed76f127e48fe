pub mod school_api;
