pub mod shake;
