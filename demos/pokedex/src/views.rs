#![allow(non_snake_case)]

use std::rc::Rc;

use settle_core::prelude::*;
use settle_ui::*;

use crate::catalog::{Catalog, FetchError, Pokemon, fetch_pokemon};

pub const NAME_FIELD: &str = "Pokemon Name";
pub const SUGGESTIONS: [&str; 3] = ["pikachu", "charizard", "mew"];
pub const NOT_FOUND_HINT: &str = "Check the spelling, or pick one of the suggestions.";

/// State the app shell owns outside of composition.
#[derive(Clone)]
pub struct AppState {
    pub pokemon_name: Signal<String>,
    pub catalog: Rc<Catalog>,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            pokemon_name: signal(String::new()),
            catalog: Rc::new(catalog),
        }
    }
}

pub fn PokemonForm(pokemon_name: &str, on_submit: impl Fn(String) + Clone + 'static) -> View {
    let draft = remember_state(String::new);
    // The field follows the submitted name, including a reset to "".
    launched_effect!(pokemon_name.to_string(), {
        let draft = draft.clone();
        let name = pokemon_name.to_string();
        move || *draft.borrow_mut() = name
    });

    let field = TextField(
        NAME_FIELD,
        draft.borrow().clone(),
        {
            let draft = draft.clone();
            move |text| *draft.borrow_mut() = text
        },
        {
            let on_submit = on_submit.clone();
            move |text: String| on_submit(text.trim().to_lowercase())
        },
    );

    let suggestions: Vec<View> = SUGGESTIONS
        .into_iter()
        .map(|name| {
            let draft = draft.clone();
            let on_submit = on_submit.clone();
            Button(name, move || {
                *draft.borrow_mut() = name.to_string();
                on_submit(name.to_string());
            })
        })
        .collect();

    Column().child((field, Row().child((Text("Try:"), suggestions))))
}

pub fn PokemonInfoFallback(name: &str) -> View {
    Column().child((
        ProgressBar(format!("Loading {name}...")),
        Text(format!("{name} #XXX")),
    ))
}

pub fn PokemonDataView(pokemon: &Pokemon) -> View {
    Column().child((
        Text(format!("{} #{:03}", pokemon.name, pokemon.number)),
        Text(format!("type: {}", pokemon.types.join(" / "))),
        Text(format!(
            "height: {:.1} m  weight: {:.1} kg",
            f64::from(pokemon.height_dm) / 10.0,
            f64::from(pokemon.weight_hg) / 10.0
        )),
        Text(format!("abilities: {}", pokemon.abilities.join(", "))),
    ))
}

pub fn PokemonErrorFallback(info: &ErrorInfo, reset: BoundaryReset) -> View {
    let hint = match info.downcast_ref::<FetchError>() {
        Some(FetchError::NotFound(_)) => vec![Text(NOT_FOUND_HINT)],
        None => vec![],
    };
    Alert(Column().child((
        Text("There was an error:"),
        Text(info.message.clone()),
        hint,
        Button("Try again", move || reset.reset()),
    )))
}

/// Fetches `pokemon_name` whenever it changes and renders by status. A failed
/// fetch is returned as `Err` for the enclosing boundary.
pub fn PokemonInfo(pokemon_name: &str, catalog: &Rc<Catalog>) -> RenderResult {
    let initial = if pokemon_name.is_empty() {
        AsyncState::idle()
    } else {
        AsyncState::pending()
    };
    let pokemon = use_async::<Pokemon, FetchError>(AsyncOptions::default().initial(initial));

    launched_effect!(pokemon_name.to_string(), {
        let pokemon = pokemon.clone();
        let catalog = catalog.clone();
        let name = pokemon_name.to_string();
        move || {
            if name.is_empty() {
                return;
            }
            if let Err(err) = pokemon.run(fetch_pokemon(catalog, name.clone())) {
                log::error!("could not start fetch for {name}: {err}");
            }
        }
    });

    if pokemon_name.is_empty() {
        return Ok(Text("Submit a pokemon"));
    }

    match pokemon.state().into_parts() {
        (AsyncStatus::Idle, ..) => Ok(Text("Submit a pokemon")),
        (AsyncStatus::Pending, ..) => Ok(PokemonInfoFallback(pokemon_name)),
        (AsyncStatus::Resolved, Some(data), _) => Ok(PokemonDataView(&data)),
        (AsyncStatus::Rejected, _, Some(error)) => {
            Err(RenderError::from_error("PokemonInfo", error))
        }
        (status, ..) => unreachable!("{status} state without its payload"),
    }
}

pub fn App(state: &AppState) -> View {
    disposable_effect((), || {
        log::info!("pokedex mounted");
        on_unmount(|| log::info!("pokedex unmounted"))
    });

    let pokemon_name = state.pokemon_name.get();
    let submit = {
        let name = state.pokemon_name.clone();
        move |new_name: String| name.set(new_name)
    };
    let reset = {
        let name = state.pokemon_name.clone();
        move || name.set(String::new())
    };

    Column().child((
        PokemonForm(&pokemon_name, submit),
        Text("----"),
        ErrorBoundary(
            vec![pokemon_name.clone()],
            reset,
            PokemonErrorFallback,
            || PokemonInfo(&pokemon_name, &state.catalog),
        ),
    ))
}
