mod comments;
mod gbairais;
