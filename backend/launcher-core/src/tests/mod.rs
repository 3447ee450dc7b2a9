mod lifecycle;
mod port;
mod remote;
