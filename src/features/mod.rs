pub mod shakes;
