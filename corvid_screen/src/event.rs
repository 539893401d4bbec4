/// Notifications the reference screen sends its owner, distinct from cell
/// contents themselves (which the owner reads directly off the `Grid`).
#[derive(Clone)]
pub enum Event {
    /// The visible grid changed and should be redrawn.
    Damage,
}

pub trait EventListener {
    fn on_event(&self, event: Event);
}
