mod authorize;
mod live;
