/*
 *  lib.rs
 *
 *  InkBuddy - poems you can hold
 *
 *  Haiku and touch-pet apps for the Waveshare 2.13" touch e-paper HAT
 *  on a Raspberry Pi.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 */

pub mod apps;
pub mod card;
pub mod comic;
pub mod config;
pub mod error;
pub mod fonts;
pub mod frames;
pub mod haiku;
pub mod hw;
pub mod pacer;
pub mod pet;
pub mod sprite;
pub mod touch;
