// Markdown side of the content pipeline: block tree projection, the eager
// HTML pass used inside column layouts, and the featured-resume split.

pub mod blocks;
pub mod featured;
pub mod html;
pub mod projection;
