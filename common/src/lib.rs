#[macro_use]
mod macros;

agg_mod![config, db, models, repository];
