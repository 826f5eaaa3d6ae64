pub mod myconfig;
