use anyhow::Context;
use pokedex::{Catalog, Session};

const SCRIPT: [&str; 3] = ["pikachu", "missingno", "mew"];

fn print_frame(title: &str, session: &Session) {
    println!("== {title}");
    println!("{}\n", session.render());
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut names: Vec<String> = std::env::args().skip(1).collect();
    if names.is_empty() {
        names = SCRIPT.iter().map(|s| s.to_string()).collect();
    }

    let catalog = Catalog::embedded().context("loading embedded catalog")?;
    let mut session = Session::new(catalog);
    print_frame("start", &session);

    for name in &names {
        session
            .submit(name)
            .with_context(|| format!("submitting {name}"))?;
        print_frame(&format!("submitted {name}"), &session);
        session.settle();
        print_frame(&format!("settled {name}"), &session);
    }

    // A fetch still in flight when the view goes away: its result is dropped.
    session.submit("ditto").context("submitting ditto")?;
    session.unmount();
    session.settle();
    log::info!("unmounted with a fetch in flight; nothing was written");
    Ok(())
}
