//! Shared state for handlers and the read-only verification context.

use std::any::Any;
use std::collections::HashMap;

use crate::model::{Consumer, Interaction};

/// Named references to the provider-side resources state handlers work with.
///
/// The caller assembles the context once per run and handlers read entries
/// through [`get`](Self::get). Entries are shared references; interior
/// mutability (for example `RefCell`) is the supported way to mutate one,
/// which keeps the context shareable across every handler of a run. Access is
/// single-threaded by design.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use veripact::StateContext;
///
/// let orders = RefCell::new(Vec::<u32>::new());
/// let mut ctx = StateContext::default();
/// ctx.insert("orders", &orders);
///
/// let entry: &RefCell<Vec<u32>> = match ctx.get("orders") {
///     Some(entry) => entry,
///     None => panic!("entry was just inserted"),
/// };
/// entry.borrow_mut().push(42);
/// assert_eq!(orders.borrow().len(), 1);
/// ```
#[derive(Default)]
pub struct StateContext<'a> {
    entries: HashMap<&'static str, &'a dyn Any>,
}

impl<'a> StateContext<'a> {
    /// Insert an entry by name, replacing any previous entry of that name.
    pub fn insert<T: Any>(&mut self, name: &'static str, value: &'a T) {
        self.entries.insert(name, value);
    }

    /// Retrieve an entry by name and type.
    #[must_use]
    pub fn get<T: Any>(&self, name: &str) -> Option<&'a T> {
        self.entries.get(name)?.downcast_ref::<T>()
    }
}

/// Read-only context slots the execution driver populates.
///
/// Slots are only filled when the verifier definition declared them; the
/// delegated test body reads them through the accessors.
#[derive(Debug, Clone, Default)]
pub struct VerifyContext {
    consumer: Option<Consumer>,
    interaction: Option<Interaction>,
}

impl VerifyContext {
    /// The consumer of the contract under execution, when the definition
    /// declared a current-consumer slot.
    #[must_use]
    pub fn consumer(&self) -> Option<&Consumer> {
        self.consumer.as_ref()
    }

    /// The interaction under execution, when the definition declared a
    /// current-interaction slot.
    #[must_use]
    pub fn interaction(&self) -> Option<&Interaction> {
        self.interaction.as_ref()
    }

    pub(crate) fn set_consumer(&mut self, consumer: Consumer) {
        self.consumer = Some(consumer);
    }

    pub(crate) fn set_interaction(&mut self, interaction: Interaction) {
        self.interaction = Some(interaction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn get_requires_matching_type() {
        let count = Cell::new(1_u32);
        let mut ctx = StateContext::default();
        ctx.insert("count", &count);

        assert!(ctx.get::<Cell<u32>>("count").is_some());
        assert!(ctx.get::<Cell<i64>>("count").is_none());
        assert!(ctx.get::<Cell<u32>>("missing").is_none());
    }

    #[test]
    fn slots_start_empty() {
        let slots = VerifyContext::default();
        assert!(slots.consumer().is_none());
        assert!(slots.interaction().is_none());
    }
}
