mod structured;
mod table;
mod version;
mod watch;
