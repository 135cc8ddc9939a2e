pub mod phq9;
