#![allow(non_snake_case)]
//! Widgets, headless text rendering, and input dispatch.

pub mod input;
pub mod render;

use std::rc::Rc;

use settle_core::*;

pub use input::{InputError, click, submit};
pub use render::render_text;

pub fn Row() -> View {
    View::new(ViewKind::Row)
}

pub fn Column() -> View {
    View::new(ViewKind::Column)
}

pub fn Text(text: impl Into<String>) -> View {
    View::new(ViewKind::Text { text: text.into() }).semantics(Semantics::new(Role::Text))
}

pub fn Button(text: impl Into<String>, on_click: impl Fn() + 'static) -> View {
    let text = text.into();
    View::new(ViewKind::Button {
        text: text.clone(),
        on_click: Some(Rc::new(on_click)),
    })
    .semantics(Semantics::new(Role::Button).label(text))
}

/// Single-line text input. `on_submit` receives the submitted text.
pub fn TextField(
    hint: impl Into<String>,
    value: impl Into<String>,
    on_change: impl Fn(String) + 'static,
    on_submit: impl Fn(String) + 'static,
) -> View {
    let hint = hint.into();
    View::new(ViewKind::TextField {
        hint: hint.clone(),
        value: value.into(),
        on_change: Some(Rc::new(on_change)),
        on_submit: Some(Rc::new(on_submit)),
    })
    .semantics(Semantics::new(Role::TextField).label(hint))
}

pub fn ProgressBar(label: impl Into<String>) -> View {
    let label = label.into();
    View::new(ViewKind::ProgressBar {
        label: label.clone(),
    })
    .semantics(Semantics::new(Role::ProgressBar).label(label))
}

/// Marks a subtree as error/recovery content.
pub fn Alert(body: View) -> View {
    Column()
        .child(body)
        .semantics(Semantics::new(Role::Alert))
}

/// Extension trait for child building
pub trait ViewExt: Sized {
    fn child(self, children: impl IntoChildren) -> Self;
}

impl ViewExt for View {
    fn child(self, children: impl IntoChildren) -> Self {
        self.with_children(children.into_children())
    }
}

pub trait IntoChildren {
    fn into_children(self) -> Vec<View>;
}

impl IntoChildren for View {
    fn into_children(self) -> Vec<View> {
        vec![self]
    }
}

impl IntoChildren for Vec<View> {
    fn into_children(self) -> Vec<View> {
        self
    }
}

impl<const N: usize> IntoChildren for [View; N] {
    fn into_children(self) -> Vec<View> {
        self.into()
    }
}

// Tuple implementations
macro_rules! impl_into_children_tuple {
    ($($idx:tt $t:ident),+) => {
        impl<$($t: IntoChildren),+> IntoChildren for ($($t,)+) {
            fn into_children(self) -> Vec<View> {
                let mut v = Vec::new();
                $(v.extend(self.$idx.into_children());)+
                v
            }
        }
    };
}

impl_into_children_tuple!(0 A, 1 B);
impl_into_children_tuple!(0 A, 1 B, 2 C);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E);

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn tuples_flatten_into_children() {
        let v = Column().child((Text("a"), vec![Text("b"), Text("c")], [Text("d")]));
        assert_eq!(v.texts(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn button_is_labelled() {
        let b = Button("Go", || {});
        let sem = b.semantics.as_ref().expect("button semantics");
        assert_eq!(sem.role, Role::Button);
        assert_eq!(sem.label.as_deref(), Some("Go"));
    }

    #[test]
    fn click_and_submit_reach_callbacks() {
        let seen = Rc::new(RefCell::new(Vec::<String>::new()));
        let ui = {
            let (a, b) = (seen.clone(), seen.clone());
            Column().child((
                TextField("Name", "", |_| {}, move |s| a.borrow_mut().push(s)),
                Button("Reset", move || b.borrow_mut().push("reset".into())),
            ))
        };

        submit(&ui, "Name", "mew").expect("field exists");
        click(&ui, "Reset").expect("button exists");
        assert_eq!(*seen.borrow(), vec!["mew", "reset"]);

        assert_eq!(
            click(&ui, "Missing"),
            Err(InputError::NotFound {
                role: Role::Button,
                label: "Missing".into()
            })
        );
    }
}
