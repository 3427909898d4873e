pub mod model;

pub trait Book {
    fn title(&self) -> &str;
    fn total_copies(&self) -> i64;
    fn available_copies(&self) -> i64;

    fn borrowed_copies(&self) -> i64 {
        self.total_copies() - self.available_copies()
    }

    fn is_available(&self) -> bool {
        self.available_copies() > 0
    }
}
