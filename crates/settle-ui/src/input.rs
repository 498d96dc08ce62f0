//! Delivers input to views by semantics, the way a platform runner would
//! route a hit-tested event.

use settle_core::{Role, View, ViewKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("no {role:?} labelled {label:?}")]
    NotFound { role: Role, label: String },
    #[error("{label:?} has no handler")]
    NoHandler { label: String },
}

fn find_labelled<'a>(root: &'a View, role: Role, label: &str) -> Result<&'a View, InputError> {
    root.find(&|v: &View| {
        v.semantics
            .as_ref()
            .is_some_and(|s| s.role == role && s.enabled && s.label.as_deref() == Some(label))
    })
    .ok_or_else(|| InputError::NotFound {
        role,
        label: label.to_string(),
    })
}

/// Clicks the enabled button labelled `label`.
pub fn click(root: &View, label: &str) -> Result<(), InputError> {
    let view = find_labelled(root, Role::Button, label)?;
    match &view.kind {
        ViewKind::Button {
            on_click: Some(cb), ..
        } => {
            log::trace!("input: click {label:?}");
            cb();
            Ok(())
        }
        _ => Err(InputError::NoHandler {
            label: label.to_string(),
        }),
    }
}

/// Types `text` into the field labelled `label` and submits it.
pub fn submit(root: &View, label: &str, text: &str) -> Result<(), InputError> {
    let view = find_labelled(root, Role::TextField, label)?;
    match &view.kind {
        ViewKind::TextField {
            on_change,
            on_submit: Some(on_submit),
            ..
        } => {
            log::trace!("input: submit {text:?} to {label:?}");
            if let Some(change) = on_change {
                change(text.to_string());
            }
            on_submit(text.to_string());
            Ok(())
        }
        _ => Err(InputError::NoHandler {
            label: label.to_string(),
        }),
    }
}
