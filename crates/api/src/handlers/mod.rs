pub mod dinosaurs;
