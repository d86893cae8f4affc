pub mod skin_hair_detector;
