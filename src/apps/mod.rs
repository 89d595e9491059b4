/*
 *  apps/mod.rs
 *
 *  InkBuddy - poems you can hold
 *
 *  The runnable app modes. `haiku` owns the panel alone; the two pet
 *  modes add the touch controller and a partial-refresh loop.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 */

pub mod haiku;
pub mod pet;
