// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::Error;
use stratum_log::{debugf, errorf, infof};
use std::{io, thread, time};

fn main() -> Result<(), Error> {
    // Picks up `STRATUM_LOG_LEVEL`, e.g. `STRATUM_LOG_LEVEL=4` to see debug output.
    stratum_logger::init()?;

    // Logs a static string on level `debug`.
    stratum_log::debug("Kick it");

    // Logs a format string on level `info`.
    infof!("You ask your mom, please? but she still says, {}!", "No");

    // Logs a format string on level `debug`.
    debugf!("{} minutes late for school", 15);

    // Logs a static string on level `warn`.
    stratum_log::warn("You missed two classes");

    // Logs an error value together with the call site.
    let err = io::Error::new(io::ErrorKind::NotFound, "homework not found");
    stratum_log::error("And no homework", &err);

    for round in 1..=3 {
        // Logs a format string on level `error`, traced to this line.
        errorf!("Detention, day {}", round);
        thread::sleep(time::Duration::from_secs(1));
    }

    Ok(())
}
