use anyhow::Result;
use safepath_core::Settings;
use safepath_core::settings::KEYS;
use safepath_core::store::KeyValueStore;

use crate::cli::args::ConfigCmd;
use crate::cli::color::Colors;
use crate::cli::format::print_kv_block;
use crate::ui::{Style, success};

pub fn run(store: &mut dyn KeyValueStore, cmd: &ConfigCmd) -> Result<()> {
    match cmd {
        ConfigCmd::Show => show(&Settings::load(store)?),
        ConfigCmd::Set { key, value } => {
            let s = Settings::set(store, key, value)?;
            success(format!("{key} = {}", s.value_of(key)?));
            Ok(())
        }
        ConfigCmd::Reset => {
            Settings::reset(store)?;
            success("Settings reset to defaults");
            show(&Settings::default())
        }
    }
}

fn show(s: &Settings) -> Result<()> {
    let c = Colors::new(&Style::default());
    let defaults = Settings::default();

    let mut pairs = Vec::with_capacity(KEYS.len());
    for key in KEYS {
        let v = s.value_of(key)?;
        let v = if v == defaults.value_of(key)? {
            format!("{v} {}", c.dim("(default)"))
        } else {
            v
        };
        pairs.push((*key, v));
    }
    print_kv_block(&pairs, |k| c.key(k));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use safepath_core::store::MemoryStore;

    #[test]
    fn set_then_reset() {
        let mut store = MemoryStore::new();
        run(
            &mut store,
            &ConfigCmd::Set {
                key: "tolerance_m".into(),
                value: "30".into(),
            },
        )
        .unwrap();
        assert_eq!(Settings::load(&store).unwrap().tolerance_m, 30.0);

        run(&mut store, &ConfigCmd::Reset).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn unknown_key_fails() {
        let mut store = MemoryStore::new();
        let cmd = ConfigCmd::Set {
            key: "radius".into(),
            value: "1".into(),
        };
        assert!(run(&mut store, &cmd).is_err());
    }
}
