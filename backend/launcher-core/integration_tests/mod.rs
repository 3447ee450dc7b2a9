mod config;
mod helpers;
mod lifecycle;
mod lock;
mod port;
mod remote;
