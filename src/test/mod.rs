mod game_search;
mod logic_terms;
mod viz_document;
