pub mod affix;
