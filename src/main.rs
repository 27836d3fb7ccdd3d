/*
 * Starfield Backdrop
 *
 * A field of slowly drifting particles that shifts with the pointer, links
 * nearby particles with faint lines, and hosts a profile card on top.
 *
 * Set RUST_LOG (e.g. RUST_LOG=starfield=debug) to change log verbosity.
 */

use starfield::app;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    nannou::app(app::model)
        .update(app::update)
        .exit(app::exit)
        .run();
}
