use serenity::async_trait;
use tracing::{debug, info, warn};

use super::error::{ActionError, ErrorPolicy};
use super::summary::{Status, Summary};

/// One step of a paginated sequence.
#[derive(Debug)]
pub enum Fetched<I> {
    Item(I),
    /// A hole in the sequence. Not an error, the engine just moves on.
    Gap,
    End,
}

#[async_trait]
pub trait ItemSource: Send {
    type Item: Send + Sync;

    async fn next_item(&mut self) -> Result<Fetched<Self::Item>, ActionError>;
}

/// The resource being swept, e.g. a channel or a thread.
#[async_trait]
pub trait ActionTarget: Send + Sync {
    type Item: Send + Sync;
    type Items<'a>: ItemSource<Item = Self::Item> + 'a
    where
        Self: 'a;

    fn id(&self) -> u64;

    /// Whether the target starts out in the state that blocks the action (archived).
    fn toggle_state(&self) -> bool;

    async fn set_toggle_state(&self, on: bool) -> Result<(), ActionError>;

    /// A fresh sequence, always starting from the beginning.
    fn items(&self) -> Self::Items<'_>;
}

#[async_trait]
pub trait Action<I: Sync>: Send + Sync {
    async fn apply(&self, item: &I) -> Result<(), ActionError>;
}

/// Decides which items the primary action applies to.
pub trait Predicate<I>: Send + Sync {
    fn matches(&self, item: &I) -> bool;
}

/// Applied to items the predicate rejects. Failures are only logged.
#[async_trait]
pub trait SecondaryAction<I: Sync>: Send + Sync {
    async fn apply(&self, item: &I) -> anyhow::Result<()>;
}

#[async_trait]
impl<I: Sync> SecondaryAction<I> for () {
    async fn apply(&self, _item: &I) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Tracks the lazy flip of the target's toggle state.
#[derive(Debug)]
struct Toggle {
    on: bool,
    attempted: bool,
    lowered: bool,
}

impl Toggle {
    fn new(on: bool) -> Self {
        Self {
            on,
            attempted: false,
            lowered: false,
        }
    }

    fn needs_lowering(&self) -> bool {
        self.on && !self.attempted
    }

    async fn lower<T: ActionTarget + ?Sized>(&mut self, target: &T) {
        if self.attempted {
            return;
        }
        self.attempted = true;
        match target.set_toggle_state(false).await {
            Ok(()) => {
                debug!(target_id = target.id(), "toggle state lowered");
                self.lowered = true;
            }
            Err(error) => {
                warn!(target_id = target.id(), %error, "could not lower toggle state");
            }
        }
    }

    async fn restore<T: ActionTarget + ?Sized>(&self, target: &T) -> Option<String> {
        if !self.lowered {
            return None;
        }
        match target.set_toggle_state(true).await {
            Ok(()) => {
                debug!(target_id = target.id(), "toggle state restored");
                None
            }
            Err(error) => {
                warn!(target_id = target.id(), %error, "could not restore toggle state");
                Some(error.to_string())
            }
        }
    }
}

/// Walks `target` once, applying `action` to every item accepted by
/// `predicate` and `secondary` to every other item.
///
/// Item failures are classified through [`ErrorPolicy`]: a disabled-state
/// failure lowers the toggle state and retries the same item once, fatal
/// codes stop the walk, everything else is counted and skipped. Whatever the
/// outcome, a lowered toggle state is put back before returning.
pub async fn run_traversal<T, P, A, S>(
    target: &T,
    predicate: &P,
    action: &A,
    secondary: &S,
) -> Summary
where
    T: ActionTarget + ?Sized,
    P: Predicate<T::Item> + ?Sized,
    A: Action<T::Item> + ?Sized,
    S: SecondaryAction<T::Item> + ?Sized,
{
    let target_id = target.id();
    let mut summary = Summary::new(target_id);
    let mut toggle = Toggle::new(target.toggle_state());
    let mut items = target.items();
    let mut retry: Option<T::Item> = None;

    let status = loop {
        let (item, retrying) = match retry.take() {
            Some(item) => (item, true),
            None => match items.next_item().await {
                Ok(Fetched::Item(item)) => {
                    summary.scanned += 1;
                    (item, false)
                }
                Ok(Fetched::Gap) => continue,
                Ok(Fetched::End) => break Status::Completed,
                Err(error) => {
                    warn!(target_id, %error, "fetching the next item failed");
                    break Status::Aborted(error.code);
                }
            },
        };

        if !predicate.matches(&item) {
            if let Err(error) = secondary.apply(&item).await {
                warn!(target_id, error = %error, "secondary action failed");
            }
            continue;
        }

        if !retrying {
            summary.matched += 1;
            if toggle.needs_lowering() {
                toggle.lower(target).await;
            }
        }

        match action.apply(&item).await {
            Ok(()) => summary.deleted += 1,
            Err(error) => match error.policy() {
                ErrorPolicy::RetryAfterStateFix if !retrying => {
                    debug!(target_id, "target is in disabled state, retrying");
                    if !toggle.attempted {
                        toggle.on = true;
                        toggle.lower(target).await;
                    }
                    retry = Some(item);
                }
                ErrorPolicy::Abort => {
                    summary.failed += 1;
                    warn!(target_id, %error, "fatal action failure");
                    break Status::Aborted(error.code);
                }
                ErrorPolicy::RetryAfterStateFix | ErrorPolicy::Skip => {
                    summary.failed += 1;
                    debug!(target_id, %error, "skipping item");
                }
            },
        }
    };
    drop(items);

    summary.status = status;
    summary.restore_error = toggle.restore(target).await;
    info!(
        target_id,
        matched = summary.matched,
        deleted = summary.deleted,
        failed = summary.failed,
        status = %summary.status,
        "traversal finished"
    );
    summary
}
