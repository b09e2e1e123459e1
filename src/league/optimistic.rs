/// Apply a change locally, then try to commit it; undo on failure.
///
/// `snapshot` is taken before `apply` runs and handed back to `rollback`
/// if `commit` fails. The commit error is returned unchanged.
///
/// # Examples
///
/// ```
/// use golf_settle::league::optimistic::optimistic_update;
/// use std::cell::RefCell;
///
/// let signups = RefCell::new(vec!["jake"]);
/// let result: Result<(), &str> = optimistic_update(
///     || signups.borrow().clone(),
///     || signups.borrow_mut().push("mike"),
///     || Err("offline"),
///     |before| *signups.borrow_mut() = before,
/// );
///
/// assert!(result.is_err());
/// assert_eq!(*signups.borrow(), vec!["jake"]);
/// ```
pub fn optimistic_update<S, E>(
    snapshot: impl FnOnce() -> S,
    apply: impl FnOnce(),
    commit: impl FnOnce() -> Result<(), E>,
    rollback: impl FnOnce(S),
) -> Result<(), E> {
    let before = snapshot();
    apply();
    if let Err(e) = commit() {
        log::debug!("commit failed, rolling back optimistic change");
        rollback(before);
        return Err(e);
    }
    Ok(())
}
