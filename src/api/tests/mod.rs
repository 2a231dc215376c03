//! API Tests
//!
//! Part organization:
//! - part_01: Form page and form submission flow
//! - part_02: JSON prediction, model info, health and metrics endpoints

mod part_02;
