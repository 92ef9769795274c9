mod assistant;
