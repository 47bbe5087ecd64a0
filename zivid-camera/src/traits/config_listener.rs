/// Observer of a configuration endpoint. Called after every accepted change.
pub trait ConfigListener<C>: Send + Sync {
    fn on_change(&self, slot: usize, config: &C);
}

impl<C, F> ConfigListener<C> for F
where
    F: Fn(usize, &C) + Send + Sync,
{
    fn on_change(&self, slot: usize, config: &C) {
        self(slot, config)
    }
}
